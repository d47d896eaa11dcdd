//! `-X` usage text parser.
//!
//! Consumes either a plain Xusage.txt or the `java.launcher.X.usage`
//! property from the launcher resource bundle (backslash-continued lines,
//! `{0}` path-separator substitution). Entries from here are supplements:
//! the driver merges them additively, never overwriting the primary parse.

use crate::model::{SwitchInfo, SwitchMap, PREFIX_X};
use crate::parser::{require_file, SwitchParser};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const PROPERTY_KEY: &str = "java.launcher.X.usage=";
const PROPERTY_END_MARKER: &str = "--add-reads";

pub struct XusageParser;

impl SwitchParser for XusageParser {
    fn parse(&mut self, root: &Path) -> Result<SwitchMap> {
        require_file(root)?;

        let content = fs::read_to_string(root)
            .with_context(|| format!("failed to read {}", root.display()))?;

        let defined_in = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let lines: Vec<String> = if root.extension().is_some_and(|e| e == "properties") {
            preprocess_properties(&content)
        } else {
            content.lines().map(str::to_string).collect()
        };

        Ok(parse_usage(&lines, &defined_in))
    }
}

fn parse_usage(lines: &[String], defined_in: &str) -> SwitchMap {
    let mut map = SwitchMap::new();
    let mut active_key: Option<String> = None;
    let mut description = String::new();

    for line in lines {
        let trimmed = line.trim();

        if trimmed.starts_with(PREFIX_X) {
            flush_description(&mut map, &active_key, &mut description);
            active_key = open_switch(&mut map, trimmed, defined_in, &mut description);
        } else {
            description.push('\n');
            description.push_str(trimmed);
        }
    }

    flush_description(&mut map, &active_key, &mut description);

    map
}

/// Start a new switch from a `-X...` line. An angle-bracketed placeholder
/// becomes the declared type; the name ends at the first colon, the
/// placeholder, or the first whitespace, whichever the line's shape calls
/// for.
fn open_switch(
    map: &mut SwitchMap,
    trimmed: &str,
    defined_in: &str,
    description: &mut String,
) -> Option<String> {
    let first_space = trimmed.find(' ').unwrap_or(trimmed.len());
    let first_colon = trimmed.find(':');
    let first_open_angle = trimmed.find('<');
    let first_close_angle = trimmed.find('>');

    let name;
    let mut type_ = "";

    let placeholder = first_open_angle
        .zip(first_close_angle)
        .filter(|(open, close)| close > open);

    if let Some((open_angle, close_angle)) = placeholder {
        // -Xloggc:<file>    log GC status to a file with time stamps
        // -Xms<size>        set initial Java heap size
        name = match first_colon {
            Some(colon) => &trimmed[2..colon],
            None => &trimmed[2..open_angle],
        };
        type_ = &trimmed[open_angle..=close_angle];
        *description = trimmed[close_angle + 1..].trim().to_string();
    } else {
        // -Xshare:off       do not attempt to use shared class data
        // -Xmixed           mixed mode execution (default)
        name = &trimmed[2..first_space];
        *description = trimmed[first_space..].trim().to_string();
    }

    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut info = SwitchInfo::new(PREFIX_X, name);
    info.type_ = type_.to_string();
    info.defined_in = defined_in.to_string();

    let key = info.key();
    map.insert(key.clone(), info);

    Some(key)
}

fn flush_description(map: &mut SwitchMap, active_key: &Option<String>, description: &mut String) {
    if description.is_empty() {
        return;
    }

    if let Some(key) = active_key {
        if let Some(info) = map.get_mut(key) {
            info.description = format!("<pre>{}</pre>", description);
        }
    }

    description.clear();
}

/// Extract the usage block from a launcher `.properties` resource: the
/// value of `java.launcher.X.usage` spans backslash-continued lines until
/// the `--add-reads` section, with `\n\` escapes stripped and `{0}`
/// replaced by the platform path separator.
fn preprocess_properties(content: &str) -> Vec<String> {
    let path_separator = if cfg!(windows) { ";" } else { ":" };

    let mut result = Vec::new();
    let mut started = false;

    for line in content.lines() {
        let line = line.trim();

        if line.contains(PROPERTY_KEY) {
            started = true;
            continue;
        }
        if line.contains(PROPERTY_END_MARKER) {
            break;
        }

        if started {
            let Some(line) = line.strip_prefix('\\') else {
                break;
            };

            let line = line
                .replace("{0}", path_separator)
                .trim()
                .replace("\\n\\n\\", "")
                .replace("\\n\\", "");

            result.push(line);
        }
    }

    result
}
