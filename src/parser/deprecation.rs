//! Deprecation/obsoletion/expiry metadata scraped from the HotSpot
//! special-flags table in `arguments.cpp`.
//!
//! The table is shared, process-wide state: ingest files in ascending JDK
//! release order *before* parsing that release's switches, because later
//! ingests add or overwrite entries and the table is never cleared.

use crate::parser::ScanError;
use crate::textutil::get_between;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Everything after this marker is test scaffolding, not flag data.
const STOP_MARKER: &str = "TEST_VERIFY_SPECIAL_JVM_FLAGS";

/// One special-flags entry:
/// `{ "MaxGCMinorPauseMillis", JDK_Version::jdk(8), JDK_Version::undefined(), JDK_Version::undefined() }`
#[derive(Debug, Clone, Default)]
pub struct DeprecatedInfo {
    pub name: String,
    pub deprecated_in: String,
    pub obsoleted_in: String,
    pub expired_in: String,
}

#[derive(Debug, Default)]
pub struct DeprecationTable {
    entries: HashMap<String, DeprecatedInfo>,
}

impl DeprecationTable {
    /// Parse one release's deprecation source into the shared table.
    pub fn ingest_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read deprecation source: {}", path.display()))?;

        self.ingest(&content)
            .with_context(|| format!("in deprecation source: {}", path.display()))
    }

    pub fn ingest(&mut self, content: &str) -> Result<()> {
        for line in content.lines() {
            if line.contains(STOP_MARKER) {
                break;
            }

            if is_deprecation_line(line) {
                let info = parse_entry(line)?;
                self.entries.insert(info.name.clone(), info);
            }
        }

        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&DeprecatedInfo> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_deprecation_line(line: &str) -> bool {
    line.contains('{') && line.contains('}') && line.contains("JDK_Version::")
}

/// A wrong-arity tuple is fatal: it means the upstream table format changed
/// and silently continuing would corrupt the shared lookup table.
fn parse_entry(line: &str) -> Result<DeprecatedInfo> {
    let between_braces = get_between(line, "{", "}")
        .ok_or_else(|| ScanError::DeprecationFormat(line.trim().to_string()))?;

    let parts: Vec<&str> = between_braces.split(',').collect();

    if parts.len() != 4 {
        return Err(ScanError::DeprecationFormat(between_braces.trim().to_string()).into());
    }

    Ok(DeprecatedInfo {
        name: parts[0].replace('"', "").trim().to_string(),
        deprecated_in: version_of(parts[1]),
        obsoleted_in: version_of(parts[2]),
        expired_in: version_of(parts[3]),
    })
}

/// `JDK_Version::jdk(8)` -> "8", `JDK_Version::undefined()` -> "".
fn version_of(part: &str) -> String {
    get_between(part, "(", ")").unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
static SpecialFlag const special_jvm_flags[] = {
  // -------------- Deprecated Flags --------------
  { "MaxGCMinorPauseMillis",        JDK_Version::jdk(8),  JDK_Version::undefined(), JDK_Version::undefined() },
  { "UseConcMarkSweepGC",           JDK_Version::jdk(9),  JDK_Version::jdk(14),     JDK_Version::jdk(15) },
};
"#;

    #[test]
    fn parses_deprecated_only_entry() {
        let mut table = DeprecationTable::default();
        table.ingest(SAMPLE).unwrap();

        let info = table.lookup("MaxGCMinorPauseMillis").unwrap();
        assert_eq!(info.deprecated_in, "8");
        assert_eq!(info.obsoleted_in, "");
        assert_eq!(info.expired_in, "");
    }

    #[test]
    fn parses_full_lifecycle_entry() {
        let mut table = DeprecationTable::default();
        table.ingest(SAMPLE).unwrap();

        let info = table.lookup("UseConcMarkSweepGC").unwrap();
        assert_eq!(info.deprecated_in, "9");
        assert_eq!(info.obsoleted_in, "14");
        assert_eq!(info.expired_in, "15");
    }

    #[test]
    fn stops_at_test_marker() {
        let content = format!(
            "{}\nvoid {}() {{\n  {{ \"NotAFlag\", JDK_Version::jdk(1), JDK_Version::undefined(), JDK_Version::undefined() }},\n}}\n",
            SAMPLE, STOP_MARKER
        );

        let mut table = DeprecationTable::default();
        table.ingest(&content).unwrap();

        assert!(table.lookup("NotAFlag").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn later_ingest_overwrites_entries() {
        let mut table = DeprecationTable::default();
        table.ingest(SAMPLE).unwrap();
        table
            .ingest(r#"{ "MaxGCMinorPauseMillis", JDK_Version::jdk(8), JDK_Version::jdk(16), JDK_Version::undefined() },"#)
            .unwrap();

        let info = table.lookup("MaxGCMinorPauseMillis").unwrap();
        assert_eq!(info.obsoleted_in, "16");
    }

    #[test]
    fn wrong_arity_is_fatal() {
        let mut table = DeprecationTable::default();
        let result =
            table.ingest(r#"{ "Foo", JDK_Version::jdk(8), JDK_Version::undefined() },"#);

        assert!(result.is_err());
    }
}
