//! Canonical switch record, per-VM ordered map, and the shared
//! first-seen-version registry.
//!
//! A switch carries two distinct identities and call sites must pick one
//! explicitly:
//!
//! - the **composite key** (`SwitchInfo::key`) scopes a declaration to its
//!   OS/CPU/component (and wrapper macro) and is the per-VM map identity;
//! - **name-only** identity (`switch_names`) is what the delta engine uses
//!   to decide whether two VM versions declare "the same switch".
//!
//! Collapsing the two would silently change the comparison reports, so no
//! `PartialEq` is derived for cross-version purposes.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const PREFIX_X: &str = "-X";
pub const PREFIX_XX: &str = "-XX:";

/// A single VM command-line switch, scoped to one OS/CPU/component
/// combination. Absent fields are empty strings so serialized output stays
/// column-stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SwitchInfo {
    pub prefix: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub os: String,
    pub cpu: String,
    pub component: String,
    #[serde(rename = "default")]
    pub default_value: String,
    pub availability: String,
    pub description: String,
    pub comment: String,
    #[serde(rename = "definedIn")]
    pub defined_in: String,
    pub since: String,
    pub range: String,
    pub deprecated: String,
    pub obsoleted: String,
    pub expired: String,
    #[serde(rename = "macro")]
    pub macro_wrapper: String,
}

impl SwitchInfo {
    pub fn new(prefix: &str, name: &str) -> Self {
        SwitchInfo {
            prefix: prefix.to_string(),
            name: name.to_string(),
            ..SwitchInfo::default()
        }
    }

    /// Composite map key: name + platform scope, plus the wrapper macro when
    /// the declaration was guarded by one. Two declarations that differ in
    /// any scope part are distinct map entries.
    pub fn key(&self) -> String {
        let mut key = format!("{}_{}_{}_{}", self.name, self.os, self.cpu, self.component);

        if !self.macro_wrapper.is_empty() {
            key.push('_');
            key.push_str(&self.macro_wrapper);
        }

        key
    }
}

/// Per-VM switch collection, ordered by composite key.
pub type SwitchMap = BTreeMap<String, SwitchInfo>;

/// Name-only view of a switch map, for cross-version set membership.
pub fn switch_names(map: &SwitchMap) -> BTreeSet<&str> {
    map.values().map(|info| info.name.as_str()).collect()
}

/// Remove every entry whose name matches, regardless of scope.
pub fn remove_by_name(map: &mut SwitchMap, name: &str) {
    map.retain(|_, info| info.name != name);
}

/// Merge a supplementary map additively: entries are inserted only when the
/// composite key is not already present.
pub fn merge_additive(map: &mut SwitchMap, supplement: SwitchMap) {
    for (key, info) in supplement {
        map.entry(key).or_insert(info);
    }
}

/// Process-wide "first seen in" lookup, populated as VMs are scanned in
/// ascending release order. Used for both switch names and intrinsic ids.
#[derive(Debug, Default)]
pub struct SinceRegistry {
    first_seen: HashMap<String, String>,
}

impl SinceRegistry {
    /// Record `version` as the first sighting of `key` unless an earlier
    /// scan already claimed it, and return the winning version.
    pub fn first_seen(&mut self, key: &str, version: &str) -> String {
        self.first_seen
            .entry(key.to_string())
            .or_insert_with(|| version.to_string())
            .clone()
    }
}
