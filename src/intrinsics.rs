//! Intrinsic-method table parser (`vmSymbols.hpp` macro tables).
//!
//! Five macro kinds feed five lookup tables; raw `do_intrinsic` 5-tuples
//! are collected and only resolved after the whole file has been scanned,
//! because class/name/signature tokens may point forward through up to two
//! levels of indirection (template substitution, and for signatures an
//! alias-chain hop).

use crate::textutil::{get_between, remove_between};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const TEMPLATE: &str = "template";
const DO_INTRINSIC: &str = "do_intrinsic";
const DO_NAME: &str = "do_name";
const DO_CLASS: &str = "do_class";
const DO_SIGNATURE: &str = "do_signature";
const DO_ALIAS: &str = "do_alias";

/// A resolved intrinsic method entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Intrinsic {
    pub id: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub name: String,
    pub signature: String,
    pub flags: String,
    pub since: String,
}

#[derive(Debug, Clone)]
struct RawIntrinsic {
    id: String,
    class_name: String,
    name: String,
    signature: String,
    flags: String,
}

#[derive(Debug, Default)]
pub struct IntrinsicParser {
    templates: HashMap<String, String>,
    classes: HashMap<String, String>,
    names: HashMap<String, String>,
    signatures: HashMap<String, String>,
    aliases: HashMap<String, String>,
    raw: Vec<RawIntrinsic>,
}

impl IntrinsicParser {
    pub fn new() -> Self {
        IntrinsicParser::default()
    }

    /// Scan one VM's macro table files. State is per-VM: call on a fresh
    /// parser for each VM.
    pub fn parse_files(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            self.parse(&content);
        }

        Ok(())
    }

    pub fn parse(&mut self, content: &str) {
        for statement in split_statements(content) {
            self.parse_statement(&statement);
        }
    }

    fn parse_statement(&mut self, statement: &str) {
        let Some(bracket) = statement.find('(') else {
            return;
        };

        let kind = &statement[..bracket];

        let Some(in_brackets) = get_between(statement, "(", ")") else {
            return;
        };
        let in_brackets = in_brackets.replace('<', "&lt;").replace('>', "&gt;");

        match kind {
            TEMPLATE => pair_into(&mut self.templates, &in_brackets, kind),
            DO_NAME => pair_into(&mut self.names, &in_brackets, kind),
            DO_CLASS => pair_into(&mut self.classes, &in_brackets, kind),
            DO_SIGNATURE => pair_into(&mut self.signatures, &in_brackets, kind),
            DO_ALIAS => pair_into(&mut self.aliases, &in_brackets, kind),
            DO_INTRINSIC => {
                let parts = split_parts(&in_brackets);
                if parts.len() == 5 {
                    self.raw.push(RawIntrinsic {
                        id: parts[0].clone(),
                        class_name: parts[1].clone(),
                        name: parts[2].clone(),
                        signature: parts[3].clone(),
                        flags: parts[4].clone(),
                    });
                } else {
                    eprintln!("warning: bad intrinsic tuple: {:?}", parts);
                }
            }
            _ => {}
        }
    }

    /// Resolve every raw declaration through the symbol tables.
    pub fn intrinsics(&self) -> Vec<Intrinsic> {
        self.raw.iter().map(|raw| self.resolve(raw)).collect()
    }

    fn resolve(&self, raw: &RawIntrinsic) -> Intrinsic {
        let class_name = self
            .classes
            .get(&raw.class_name)
            .or_else(|| self.templates.get(&raw.class_name))
            .map(|class| class.replace('/', "."))
            .unwrap_or_default();

        let name = self
            .names
            .get(&raw.name)
            .or_else(|| self.templates.get(&raw.name))
            .cloned()
            .unwrap_or_default();

        let signature = self
            .resolve_signature(&raw.signature)
            .unwrap_or_default();

        Intrinsic {
            id: raw.id.clone(),
            class_name,
            name,
            signature,
            flags: raw.flags.clone(),
            since: String::new(),
        }
    }

    /// Signatures resolve through signature/name/template tables, with one
    /// alias hop allowed before retrying the same cascade.
    fn resolve_signature(&self, token: &str) -> Option<String> {
        self.signature_cascade(token).or_else(|| {
            let aliased = self.aliases.get(token)?;
            self.signature_cascade(aliased)
        })
    }

    fn signature_cascade(&self, token: &str) -> Option<String> {
        self.signatures
            .get(token)
            .or_else(|| self.names.get(token))
            .or_else(|| self.templates.get(token))
            .cloned()
    }
}

fn pair_into(table: &mut HashMap<String, String>, in_brackets: &str, kind: &str) {
    let parts = split_parts(in_brackets);

    if parts.len() == 2 {
        table.insert(parts[0].clone(), parts[1].clone());
    } else {
        eprintln!("warning: bad {} entry: {:?}", kind, parts);
    }
}

/// Macro arguments: comma-split with spaces and quotes removed per part.
fn split_parts(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.replace([' ', '"'], ""))
        .filter(|part| !part.is_empty())
        .collect()
}

/// Split physical lines into complete macro invocations: several statements
/// may share one physical line, and block comments are stripped first.
/// Statement boundaries are `)` characters outside double quotes.
fn split_statements(content: &str) -> Vec<String> {
    let mut result = Vec::new();

    for line in content.lines() {
        let line = remove_between(line, "/*", "*/");

        let mut last_start = 0;
        let mut in_quotes = false;

        for (index, c) in line.char_indices() {
            if c == '"' {
                in_quotes = !in_quotes;
            } else if c == ')' && !in_quotes {
                let part = line[last_start..=index].trim();
                if is_valid_statement(part) {
                    result.push(part.to_string());
                }
                last_start = index + 1;
            }
        }

        let part = line[last_start..].trim();
        if is_valid_statement(part) {
            result.push(part.to_string());
        }
    }

    result
}

fn is_valid_statement(part: &str) -> bool {
    !part.is_empty() && part.contains('(') && part.contains(')')
}
