//! Zing/Zulu `-XX:+PrintFlagsFinal` dump parser.
//!
//! ```text
//! uintx ARTADebugFlags = 0 {product}
//! ```
//!
//! Default values may themselves contain spaces and punctuation, so the
//! line is split by an explicit four-state character scan rather than a
//! generic tokenizer: first space ends TYPE, first `=` ends NAME, first `{`
//! ends DEFAULT, first `}` ends AVAILABILITY.

use crate::model::{SwitchInfo, SwitchMap, PREFIX_XX};
use crate::parser::{require_file, SwitchParser};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct ZingParser;

#[derive(Clone, Copy, PartialEq)]
enum OptionPart {
    Type,
    Name,
    Default,
    Availability,
}

impl SwitchParser for ZingParser {
    fn parse(&mut self, root: &Path) -> Result<SwitchMap> {
        require_file(root)?;

        let content = fs::read_to_string(root)
            .with_context(|| format!("failed to read {}", root.display()))?;

        Ok(parse_dump(&content))
    }
}

fn parse_dump(content: &str) -> SwitchMap {
    let mut map = SwitchMap::new();

    for line in content.lines() {
        let trimmed = line.trim();

        if !is_switch_line(trimmed) {
            continue;
        }

        if let Some(info) = parse_line(trimmed) {
            map.insert(info.key(), info);
        }
    }

    map
}

fn is_switch_line(line: &str) -> bool {
    line.contains('=') && line.contains('{') && line.contains('}')
}

fn parse_line(line: &str) -> Option<SwitchInfo> {
    let mut type_ = "";
    let mut name = "";
    let mut default_value = "";
    let mut availability = "";

    let mut current = OptionPart::Type;
    let mut part_start = 0;

    for (index, c) in line.char_indices() {
        match current {
            OptionPart::Type => {
                if c == ' ' {
                    type_ = line[part_start..index].trim();
                    part_start = index + 1;
                    current = OptionPart::Name;
                }
            }
            OptionPart::Name => {
                if c == '=' {
                    name = line[part_start..index].trim();
                    part_start = index + 1;
                    current = OptionPart::Default;
                }
            }
            OptionPart::Default => {
                if c == '{' {
                    default_value = line[part_start..index].trim();
                    part_start = index + 1;
                    current = OptionPart::Availability;
                }
            }
            OptionPart::Availability => {
                if c == '}' {
                    availability = line[part_start..index].trim();
                    break;
                }
            }
        }
    }

    if name.is_empty() {
        return None;
    }

    let mut info = SwitchInfo::new(PREFIX_XX, name);
    info.type_ = type_.to_string();
    info.default_value = default_value.to_string();
    info.availability = availability.to_string();

    Some(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_flag_line() {
        let map = parse_dump("uintx ARTADebugFlags = 0 {product}\n");

        assert_eq!(map.len(), 1);
        let info = map.values().next().unwrap();
        assert_eq!(info.name, "ARTADebugFlags");
        assert_eq!(info.type_, "uintx");
        assert_eq!(info.default_value, "0");
        assert_eq!(info.availability, "product");
    }

    #[test]
    fn default_value_may_contain_spaces() {
        let map = parse_dump("ccstr DumpPath = /tmp/my dump dir {product rw}\n");

        let info = map.values().next().unwrap();
        assert_eq!(info.name, "DumpPath");
        assert_eq!(info.default_value, "/tmp/my dump dir");
        assert_eq!(info.availability, "product rw");
    }

    #[test]
    fn empty_default_is_preserved() {
        let map = parse_dump("ccstr NativeMemoryTracking = {product}\n");

        let info = map.values().next().unwrap();
        assert_eq!(info.name, "NativeMemoryTracking");
        assert_eq!(info.default_value, "");
    }

    #[test]
    fn non_flag_lines_skipped() {
        let input = "\
java version \"1.8.0-zing_19.07.0.0\"
[Global flags]
bool UseTickProfiler = false {product}
done.
";
        let map = parse_dump(input);

        assert_eq!(map.len(), 1);
        assert_eq!(map.values().next().unwrap().name, "UseTickProfiler");
    }
}
