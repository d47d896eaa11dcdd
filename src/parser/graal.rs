//! GraalVM option dump parser (`-XX:+JVMCIPrintProperties` output).
//!
//! ```text
//! graal.CompilerConfiguration = community                   [String]
//!       Names the Graal compiler configuration to use.
//! ```
//!
//! A `key.name = value [Type]` line opens a record; every following
//! non-section line accumulates as that record's description until the next
//! record opens. The first description line of each block fixes the common
//! left margin, which is trimmed from the whole block so reformatted text
//! keeps its relative indentation.

use crate::model::{SwitchInfo, SwitchMap, PREFIX_XX};
use crate::parser::{require_file, SwitchParser};
use crate::textutil::get_between;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_SWITCH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+\.\S+\s+=\s+.*\[[^\]]+\]$").unwrap());

pub struct GraalParser;

impl SwitchParser for GraalParser {
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
    let mut description_indent = 0;

    for line in content.lines() {
        let trimmed = line.trim();

        if is_switch_line(trimmed) {
            flush_description(&mut map, &active_key, &mut description);

            let parts: Vec<&str> = trimmed.split_whitespace().collect();

            let type_ = parts
                .get(3)
                .and_then(|part| get_between(part, "[", "]"))
                .unwrap_or("");
            let name = parts.first().copied().unwrap_or("");
            let name = name.split_once('.').map(|(_, rest)| rest).unwrap_or(name);
            let default_value = parts.get(2).copied().unwrap_or("");

            let mut info = SwitchInfo::new(PREFIX_XX, name);
            info.type_ = type_.to_string();
            info.default_value = default_value.to_string();

            active_key = Some(info.key());
            map.insert(info.key(), info);
        } else if is_section_line(line) {
            continue;
        } else {
            if description.is_empty() {
                description_indent = line.chars().take_while(|c| *c == ' ').count();
            }

            let stripped = if line.chars().count() > description_indent {
                line.chars().skip(description_indent).collect::<String>()
            } else {
                line.to_string()
            };

            description.push_str(&stripped);
            description.push('\n');
        }
    }

    flush_description(&mut map, &active_key, &mut description);

    map
}

/// Attach the accumulated block to the record it describes, then reset.
fn flush_description(map: &mut SwitchMap, active_key: &Option<String>, description: &mut String) {
    if description.is_empty() {
        return;
    }

    if let Some(key) = active_key {
        if let Some(info) = map.get_mut(key) {
            info.description = description.clone();
        }
    }

    description.clear();
}

fn is_switch_line(trimmed: &str) -> bool {
    RE_SWITCH_LINE.is_match(trimmed)
}

fn is_section_line(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}
