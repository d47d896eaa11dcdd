//! HotSpot globals.hpp macro-declaration parser.
//!
//! Switch declarations are multi-line C++ macro invocations:
//!
//! ```text
//!   product(bool, UseLargePages, false,                               \
//!           "Use large page memory")                                  \
//! ```
//!
//! The availability keyword before the first `(` decides how many
//! comma-separated fields to expect and which terminator ends the
//! statement. Statements are reassembled across physical lines by an
//! explicit idle/accumulating state machine, then re-tokenized with the
//! quote-aware splitter.

use crate::model::{SwitchInfo, SwitchMap, PREFIX_XX};
use crate::parser::deprecation::DeprecationTable;
use crate::parser::{path_meta, require_dir, SwitchParser};
use crate::textutil::explode_line;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Conditional-compilation guards that may wrap a whole declaration. The
/// wrapper contributes one extra parenthesis level and is recorded on the
/// record to disambiguate otherwise-identical declarations.
const WRAPPER_MACROS: &[&str] = &[
    "JFR_ONLY",
    "JVMCI_ONLY",
    "COMPILER1_PRESENT",
    "COMPILER2_PRESENT",
    "NOT_COMPILER2",
];

/// Optional attribute token carried by some macro forms between the default
/// value and the description; its presence shifts the description index.
const EXTRA_ATTRIBUTES: &[&str] = &["DIAGNOSTIC", "EXPERIMENTAL", "MANAGEABLE"];

pub struct HotSpotParser<'a> {
    deprecation: &'a DeprecationTable,
}

/// One in-flight multi-line macro statement.
struct Statement {
    availability: String,
    macro_wrapper: String,
    /// Substring whose appearance in the accumulated buffer completes the
    /// statement (includes the wrapper's extra `)` when applicable).
    terminator: String,
    /// Position marker used when cutting the completed statement; never
    /// includes the wrapper's extra parenthesis.
    terminator_base: &'static str,
    default_field: Option<usize>,
    description_field: Option<usize>,
    buffer: String,
}

enum ScanState {
    Idle,
    Accumulating(Statement),
}

impl<'a> HotSpotParser<'a> {
    pub fn new(deprecation: &'a DeprecationTable) -> Self {
        HotSpotParser { deprecation }
    }
}

impl SwitchParser for HotSpotParser<'_> {
    fn parse(&mut self, root: &Path) -> Result<SwitchMap> {
        require_dir(root)?;

        let mut map = SwitchMap::new();

        for file in find_globals_headers(root)? {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let relative = file.strip_prefix(root).unwrap_or(&file).to_path_buf();

            parse_header(&mut map, &content, &relative, self.deprecation);
        }

        Ok(map)
    }
}

/// Every header under the root whose name contains "globals", in sorted
/// order for deterministic later-file-wins semantics.
fn find_globals_headers(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/*globals*.hpp", root.display());

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("bad glob pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    files.sort();

    Ok(files)
}

fn parse_header(
    map: &mut SwitchMap,
    content: &str,
    relative_path: &Path,
    deprecation: &DeprecationTable,
) {
    let mut state = ScanState::Idle;
    // Composite key of the last completed record, for range attachment.
    let mut active_key: Option<String> = None;

    for raw_line in content.lines() {
        let line = clean_line(raw_line);

        // Statement text for this line: the full cleaned line while
        // accumulating, or the unwrapped remainder when a wrapper macro
        // opened the statement on this line.
        let mut opened_text: Option<String> = None;

        if let ScanState::Idle = state {
            match classify_line(&line) {
                LineKind::Open(statement, text) => {
                    state = ScanState::Accumulating(statement);
                    opened_text = Some(text);
                }
                LineKind::Range => {
                    if let Some(key) = &active_key {
                        if let Some(info) = map.get_mut(key) {
                            info.range = line.clone();
                        }
                    }
                    continue;
                }
                LineKind::Irrelevant => continue,
            }
        }

        if let ScanState::Accumulating(statement) = &mut state {
            accumulate(statement, opened_text.as_deref().unwrap_or(&line));

            if statement.buffer.contains(&statement.terminator) {
                let statement = match std::mem::replace(&mut state, ScanState::Idle) {
                    ScanState::Accumulating(s) => s,
                    ScanState::Idle => unreachable!(),
                };
                active_key =
                    complete_statement(map, statement, relative_path, deprecation);
            }
        }
    }
}

/// Strip escape artifacts that would confuse the tokenizer: escaped quotes
/// become plain apostrophes, line-continuation backslashes vanish, and a
/// stray space before a closing quote-paren is normalized.
fn clean_line(line: &str) -> String {
    line.replace("\\\"", "'")
        .replace('\\', "")
        .replace("\" )", "\")")
        .trim()
        .to_string()
}

enum LineKind {
    /// A recognized declaration opens here; the `String` is the statement
    /// text to buffer for this line (wrapper macro prefix already removed).
    Open(Statement, String),
    Range,
    Irrelevant,
}

fn classify_line(line: &str) -> LineKind {
    let Some(bracket) = line.find('(') else {
        return LineKind::Irrelevant;
    };

    let keyword = &line[..bracket];

    if WRAPPER_MACROS.contains(&keyword) {
        // Unwrap one level: the inner keyword drives the statement shape,
        // and the wrapper demands one extra closing parenthesis.
        let inner = &line[bracket + 1..];
        let Some(inner_bracket) = inner.find('(') else {
            return LineKind::Irrelevant;
        };
        let inner_keyword = &inner[..inner_bracket];

        return match open_statement(inner_keyword, true) {
            Some(mut statement) => {
                statement.macro_wrapper = keyword.to_string();
                LineKind::Open(statement, inner.to_string())
            }
            None => LineKind::Irrelevant,
        };
    }

    if keyword == "range" {
        return LineKind::Range;
    }

    match open_statement(keyword, false) {
        Some(statement) => LineKind::Open(statement, line.to_string()),
        None => LineKind::Irrelevant,
    }
}

/// Map a recognized availability keyword to the statement shape it opens.
fn open_statement(keyword: &str, wrapped: bool) -> Option<Statement> {
    let (terminator_base, default_field, description_field): (
        &'static str,
        Option<usize>,
        Option<usize>,
    ) = match keyword {
        "define_pd_global" => (");", Some(2), None),
        "product_pd" | "develop_pd" | "diagnostic_pd" => ("\")", None, Some(2)),
        "product" | "product_rw" | "develop" | "lp64_product" | "notproduct"
        | "diagnostic" | "experimental" | "manageable" => ("\")", Some(2), Some(3)),
        _ => return None,
    };

    let mut terminator = terminator_base.to_string();
    if wrapped {
        terminator.push(')');
    }

    Some(Statement {
        availability: keyword.to_string(),
        macro_wrapper: String::new(),
        terminator,
        terminator_base,
        default_field,
        description_field,
        buffer: String::new(),
    })
}

fn accumulate(statement: &mut Statement, line: &str) {
    if looks_like_list_item(line) {
        // A quoted numbered-list line gets a visual break marker so the
        // reflowed description keeps its list shape.
        statement.buffer.push_str("\"<br>");
        statement.buffer.push_str(&line[1..]);
    } else {
        statement.buffer.push_str(line);
    }
}

fn looks_like_list_item(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('"') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Finish a reassembled statement: cut at the terminator, split off the
/// trailing comment, re-tokenize, and get-or-create the record under its
/// composite key. Returns the record's key so a following `range(...)` line
/// can attach to it.
fn complete_statement(
    map: &mut SwitchMap,
    statement: Statement,
    relative_path: &Path,
    deprecation: &DeprecationTable,
) -> Option<String> {
    let collapsed = RE_WHITESPACE
        .replace_all(&statement.buffer.replace("\"\"", ""), " ")
        .to_string();

    let ending_pos = collapsed.find(statement.terminator_base)?;

    let comment = collapsed[ending_pos..]
        .find("//")
        .map(|pos| collapsed[ending_pos + pos..].trim().to_string())
        .unwrap_or_default();

    let body = &collapsed[..ending_pos];
    let body = &body[body.find('(')? + 1..];

    let parts = explode_line(body);

    let type_ = parts.first()?.clone();
    let name = parts.get(1)?.clone();

    // The optional attribute token sits between default and description and
    // shifts the description index right by one.
    let description_field = statement.description_field.map(|index| {
        if parts
            .get(index)
            .is_some_and(|part| EXTRA_ATTRIBUTES.contains(&part.as_str()))
        {
            index + 1
        } else {
            index
        }
    });

    // Platform scope comes from the path, so the composite key is known
    // before the map lookup; a re-declaration with identical scope mutates
    // the existing record instead of replacing it.
    let mut candidate = SwitchInfo::new(PREFIX_XX, &name);
    candidate.macro_wrapper = statement.macro_wrapper.clone();
    path_meta::apply(&mut candidate, relative_path);

    let key = candidate.key();

    let info = map.entry(key.clone()).or_insert_with(|| {
        let mut created = candidate;
        created.type_ = type_;
        created.availability = statement.availability.clone();
        created.comment = comment.clone();
        created.defined_in = relative_path.display().to_string();
        created
    });

    path_meta::apply(info, relative_path);

    if let Some(index) = statement.default_field {
        if let Some(default_value) = parts.get(index) {
            info.default_value = default_value.clone();
        }
    }

    if let Some(index) = description_field {
        if let Some(description) = parts.get(index) {
            let description = description.strip_prefix("<br>").unwrap_or(description);
            info.description = description.to_string();
        }
    }

    if let Some(deprecated) = deprecation.lookup(&name) {
        info.deprecated = deprecated.deprecated_in.clone();
        info.obsoleted = deprecated.obsoleted_in.clone();
        info.expired = deprecated.expired_in.clone();
    }

    Some(key)
}
