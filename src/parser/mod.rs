//! Per-family switch parsers — dispatch by VM family.
//!
//! Each parser turns one VM's source tree or dump file into a normalized
//! `SwitchMap`. Parsing is best-effort: unrecognized lines are skipped (the
//! scraped source conventions are hand-written and unstable), and only two
//! conditions are fatal — a missing scan root, and a deprecation table whose
//! format has visibly changed.

pub mod deprecation;
pub mod graal;
pub mod graal_native;
pub mod hotspot;
pub mod openj9;
pub mod path_meta;
pub mod xusage;
pub mod zing;

use crate::model::SwitchMap;
use crate::vm::VmFamily;
use anyhow::Result;
use deprecation::DeprecationTable;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan root does not exist or is the wrong kind: {0}")]
    ScanRootMissing(PathBuf),
    #[error("unparseable deprecation entry (expected a 4-field tuple): '{0}'")]
    DeprecationFormat(String),
}

/// Capability contract shared by the per-family parsers. The algorithms
/// behind it are unrelated; only the tokenizer utilities are shared.
pub trait SwitchParser {
    fn parse(&mut self, root: &Path) -> Result<SwitchMap>;
}

/// Parse one VM with the parser matching its family.
pub fn parse_vm(
    family: VmFamily,
    root: &Path,
    deprecation: &DeprecationTable,
) -> Result<SwitchMap> {
    match family {
        VmFamily::Hotspot => hotspot::HotSpotParser::new(deprecation).parse(root),
        VmFamily::Graal => graal::GraalParser.parse(root),
        VmFamily::GraalNative => graal_native::GraalNativeParser.parse(root),
        VmFamily::Openj9 => openj9::OpenJ9Parser.parse(root),
        VmFamily::Zing => zing::ZingParser.parse(root),
    }
}

/// A dump-file parser's root must be a regular file.
fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ScanError::ScanRootMissing(path.to_path_buf()).into());
    }
    Ok(())
}

/// A tree parser's root must be a directory.
fn require_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(ScanError::ScanRootMissing(path.to_path_buf()).into());
    }
    Ok(())
}
