//! Graal native-image option listing parser.
//!
//! ```text
//! -H:CompilerBackend=lir                  Backend used by the compiler.
//! -R:±PrintGC                             Print summary GC information.
//! ```
//!
//! The first token encodes the hosted/runtime marker, an optional `±`
//! boolean marker, and an optional `=default` suffix. Types are inferred
//! heuristically from the literal shape of the default value.

use crate::model::{SwitchInfo, SwitchMap, PREFIX_XX};
use crate::parser::{require_file, SwitchParser};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const TYPE_BOOLEAN: &str = "bool";
const ELLIPSIS: &str = "...";
const DEFAULT_IN_DESCRIPTION: &str = "Default:";

const MARKER_HOSTED: char = 'H';
const MARKER_RUNTIME: char = 'R';

pub struct GraalNativeParser;

impl SwitchParser for GraalNativeParser {
    fn parse(&mut self, root: &Path) -> Result<SwitchMap> {
        require_file(root)?;

        let content = fs::read_to_string(root)
            .with_context(|| format!("failed to read {}", root.display()))?;

        Ok(parse_dump(&content))
    }
}

fn parse_dump(content: &str) -> SwitchMap {
    let mut map = SwitchMap::new();
    let mut active_key: Option<String> = None;
    let mut description = String::new();

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('-') {
            finish_record(&mut map, &active_key, &mut description);
            active_key = open_record(&mut map, trimmed, &mut description);
        } else {
            description.push('\n');
            description.push_str(trimmed);
        }
    }

    finish_record(&mut map, &active_key, &mut description);

    map
}

fn open_record(map: &mut SwitchMap, trimmed: &str, description: &mut String) -> Option<String> {
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *parts.first()?;

    let marker = first.chars().nth(1);

    let mut name = first;
    let mut type_: Option<&str> = None;

    if let Some(colon) = name.find(':') {
        name = &name[colon + 1..];

        if let Some(rest) = name.strip_prefix('±') {
            name = rest;
            type_ = Some(TYPE_BOOLEAN);
        }
    }

    let mut default_value: Option<&str> = None;

    if let Some(equals) = name.find('=') {
        default_value = Some(&name[equals + 1..]);
        name = &name[..equals];
    }

    if name.is_empty() {
        return None;
    }

    // The rest of the first line starts the description.
    *description = parts[1..].join(" ");

    // Placeholder values and the tool's own working directory leaking into
    // the dump are noise, not defaults.
    let default_value = default_value.filter(|value| {
        !value.eq_ignore_ascii_case(ELLIPSIS) && !value.contains("vmopts")
    });

    let mut info = SwitchInfo::new(PREFIX_XX, name);
    info.default_value = default_value.unwrap_or("").to_string();
    info.type_ = type_
        .map(str::to_string)
        .unwrap_or_else(|| infer_type(default_value.unwrap_or("")));

    match marker {
        Some(MARKER_HOSTED) => info.availability = "Hosted".to_string(),
        Some(MARKER_RUNTIME) => info.availability = "Runtime".to_string(),
        _ => {}
    }

    let key = info.key();
    map.insert(key.clone(), info);

    Some(key)
}

/// Complete the record being described: attach the description, and when it
/// embeds a `Default:` clause, recover the default value (and type) from it.
fn finish_record(map: &mut SwitchMap, active_key: &Option<String>, description: &mut String) {
    if description.is_empty() {
        return;
    }

    let Some(key) = active_key else {
        description.clear();
        return;
    };
    let Some(info) = map.get_mut(key) else {
        description.clear();
        return;
    };

    let mut text = std::mem::take(description);

    if let Some(pos) = text.find(DEFAULT_IN_DESCRIPTION) {
        let default_part = text[pos + DEFAULT_IN_DESCRIPTION.len()..].trim().to_string();
        text = text[..pos].trim_end().to_string();

        if info.type_ == TYPE_BOOLEAN {
            info.default_value = if default_part.contains("enabled") {
                "true".to_string()
            } else {
                "false".to_string()
            };
        } else {
            info.type_ = infer_type(&default_part);
            info.default_value = default_part;
        }
    }

    info.description = text;
}

/// Literal-shape type inference: letters win over digits, a decimal point
/// turns digits into a double, and an empty value stays untyped.
fn infer_type(value: &str) -> String {
    let mut alpha = false;
    let mut numeric = false;
    let mut dot = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            alpha = true;
        } else if c.is_ascii_digit() {
            numeric = true;
        } else if c == '.' {
            dot = true;
        }
    }

    if alpha {
        "String".to_string()
    } else if numeric {
        if dot {
            "double".to_string()
        } else {
            "int".to_string()
        }
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_switch_with_default() {
        let map = parse_dump("-H:CompilerBackend=lir     Backend used by the compiler.\n");

        let info = map.values().next().unwrap();
        assert_eq!(info.name, "CompilerBackend");
        assert_eq!(info.default_value, "lir");
        assert_eq!(info.availability, "Hosted");
        assert_eq!(info.type_, "String");
        assert_eq!(info.description, "Backend used by the compiler.");
    }

    #[test]
    fn runtime_boolean_switch() {
        let map = parse_dump("-R:±PrintGC     Print summary GC information.\n");

        let info = map.values().next().unwrap();
        assert_eq!(info.name, "PrintGC");
        assert_eq!(info.availability, "Runtime");
        assert_eq!(info.type_, "bool");
        assert_eq!(info.default_value, "");
    }

    #[test]
    fn type_inference_precedence() {
        assert_eq!(infer_type("community"), "String");
        assert_eq!(infer_type("2g"), "String");
        assert_eq!(infer_type("1.5"), "double");
        assert_eq!(infer_type("512"), "int");
        assert_eq!(infer_type(""), "");
    }

    #[test]
    fn ellipsis_default_discarded() {
        let map = parse_dump("-H:Path=...     Search path.\n");

        let info = map.values().next().unwrap();
        assert_eq!(info.default_value, "");
        assert_eq!(info.type_, "");
    }

    #[test]
    fn own_working_directory_discarded() {
        let map = parse_dump("-H:CachePath=/home/ci/vmopts/cache     Cache location.\n");

        let info = map.values().next().unwrap();
        assert_eq!(info.default_value, "");
    }

    #[test]
    fn continuation_lines_extend_description() {
        let input = "\
-H:MaxNodes=1000     Maximum number of nodes.
                     Larger graphs are split.
-H:Next=1            Next switch.
";
        let map = parse_dump(input);

        let info = map.values().find(|i| i.name == "MaxNodes").unwrap();
        assert_eq!(
            info.description,
            "Maximum number of nodes.\nLarger graphs are split."
        );
    }

    #[test]
    fn default_clause_in_description_recovered() {
        let input = "-R:±UsePerfData     Enables performance data. Default: enabled (use -R:-UsePerfData to disable).\n";
        let map = parse_dump(input);

        let info = map.values().next().unwrap();
        assert_eq!(info.default_value, "true");
        assert_eq!(info.description, "Enables performance data.");
    }

    #[test]
    fn non_boolean_default_clause_sets_type() {
        let input = "-H:Threads     Number of build threads. Default: 4\n";
        let map = parse_dump(input);

        let info = map.values().next().unwrap();
        assert_eq!(info.default_value, "4");
        assert_eq!(info.type_, "int");
    }
}
