//! OpenJ9 switch parser: jvminit.h `VMOPT_` defines plus the exelib NLS
//! message catalog's internal help text.
//!
//! The catalog emits both a generic and a placeholder-suffixed form for the
//! same underlying switch (`-Xfoo` and `-Xfoo:<path>`); only the suffixed,
//! more descriptive one is kept. Boolean-disabling `-XX:-Foo` declarations
//! are discarded so each switch appears once, in its enabling form.

use crate::model::{remove_by_name, SwitchInfo, SwitchMap, PREFIX_X, PREFIX_XX};
use crate::parser::{require_dir, SwitchParser};
use crate::textutil::get_between;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const INIT_HEADER: &str = "runtime/oti/jvminit.h";
const NLS_CATALOG: &str = "runtime/nls/exel/exelib.nls";

const HELP_MARKER: &str = "J9NLS_EXELIB_INTERNAL_HELP_";
const SWITCH_START: &str = "-X";

/// Placeholder suffixes whose bare companion entry must be dropped.
const PLACEHOLDER_SUFFIXES: &[&str] = &["&lt;x&gt;", ":&lt;path&gt;"];

pub struct OpenJ9Parser;

impl SwitchParser for OpenJ9Parser {
    fn parse(&mut self, root: &Path) -> Result<SwitchMap> {
        require_dir(root)?;

        let mut map = SwitchMap::new();

        let init_header = root.join(INIT_HEADER);
        let content = fs::read_to_string(&init_header)
            .with_context(|| format!("failed to read {}", init_header.display()))?;
        parse_init_header(&mut map, &content);

        let nls_catalog = root.join(NLS_CATALOG);
        let content = fs::read_to_string(&nls_catalog)
            .with_context(|| format!("failed to read {}", nls_catalog.display()))?;
        parse_nls_catalog(&mut map, &content);

        Ok(map)
    }
}

fn parse_init_header(map: &mut SwitchMap, content: &str) {
    for line in content.lines() {
        let trimmed = line.trim();

        if !trimmed.contains("#define VMOPT_") {
            continue;
        }

        let escaped = escape_angles(trimmed);

        if let Some(raw) = get_between(&escaped, "\"", "\"") {
            store_switch(map, raw.trim(), None);
        }
    }
}

fn parse_nls_catalog(map: &mut SwitchMap, content: &str) {
    for line in content.lines() {
        let trimmed = line.trim();

        if !trimmed.contains(HELP_MARKER) || !trimmed.contains(SWITCH_START) {
            continue;
        }

        // J9NLS_EXELIB_INTERNAL_HELP_1_7=\ -Xnojit disable the JIT
        let escaped = escape_angles(trimmed);

        let mut switch_text = String::new();
        let mut description = String::new();
        let mut seen_first_switch = false;
        let mut in_description = false;

        for part in escaped.split_whitespace() {
            if part.starts_with(SWITCH_START) && !in_description {
                switch_text.push_str(part);
                switch_text.push(' ');
                seen_first_switch = true;
            } else if seen_first_switch {
                description.push_str(part);
                description.push(' ');
                in_description = true;
            }
        }

        let description = format!("<pre>{}</pre>", description.trim());

        store_switch(map, switch_text.trim(), Some(description));
    }
}

/// Normalize one raw `-X.../-XX:...` literal into the map. Returns nothing:
/// unusable forms are dropped, which is the point.
fn store_switch(map: &mut SwitchMap, raw: &str, description: Option<String>) {
    let (prefix, mut name, type_) = if let Some(rest) = raw.strip_prefix(PREFIX_XX) {
        // A leading +/- encodes the boolean sense; only the enabling form
        // survives, as its disabling twin would be a near-identical dup.
        if let Some(enabled) = rest.strip_prefix('+') {
            (PREFIX_XX, enabled, "bool")
        } else if rest.starts_with('-') {
            return;
        } else {
            (PREFIX_XX, rest, "")
        }
    } else if let Some(rest) = raw.strip_prefix(PREFIX_X) {
        (PREFIX_X, rest, "")
    } else {
        return;
    };

    name = clean_name(name);

    if name.is_empty() {
        return;
    }

    let mut info = SwitchInfo::new(prefix, name);
    info.type_ = type_.to_string();
    if let Some(description) = description {
        info.description = description;
    }

    let stored_name = info.name.clone();
    map.insert(info.key(), info);

    for suffix in PLACEHOLDER_SUFFIXES {
        if let Some(bare) = stored_name.strip_suffix(suffix) {
            remove_by_name(map, bare);
        }
    }
}

fn clean_name(name: &str) -> &str {
    name.strip_suffix(':')
        .or_else(|| name.strip_suffix('='))
        .unwrap_or(name)
}

fn escape_angles(line: &str) -> String {
    line.replace('<', "&lt;").replace('>', "&gt;")
}
