//! Added/removed computation between two normalized option sets.
//!
//! Cross-version membership is **name-only**, on purpose: the per-VM maps
//! key on full platform scope, but the comparison reports are understood by
//! their audience to operate at name granularity. A switch whose semantics
//! changed under an unchanged name therefore reports as "unchanged" — a
//! known simplification, preserved. No rename detection is attempted.

use crate::model::{switch_names, SwitchMap};
use serde::Serialize;

/// Switches present on only one side of an (earlier, later) VM pair.
#[derive(Debug, Serialize)]
pub struct DeltaTable {
    pub earlier: String,
    pub later: String,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl DeltaTable {
    pub fn addition_count(&self) -> usize {
        self.added.len()
    }

    pub fn removal_count(&self) -> usize {
        self.removed.len()
    }
}

/// One forward pass over each side's name set. Output is sorted by switch
/// name (the sets iterate in order).
pub fn diff(
    earlier_name: &str,
    later_name: &str,
    earlier: &SwitchMap,
    later: &SwitchMap,
) -> DeltaTable {
    let earlier_names = switch_names(earlier);
    let later_names = switch_names(later);

    let removed = earlier_names
        .iter()
        .filter(|name| !later_names.contains(*name))
        .map(|name| name.to_string())
        .collect();

    let added = later_names
        .iter()
        .filter(|name| !earlier_names.contains(*name))
        .map(|name| name.to_string())
        .collect();

    DeltaTable {
        earlier: earlier_name.to_string(),
        later: later_name.to_string(),
        added,
        removed,
    }
}

/// A default value that differs between a vanilla build and a flavour.
#[derive(Debug, Serialize)]
pub struct ChangedDefault {
    pub name: String,
    pub vanilla_value: String,
    pub flavour_value: String,
}

/// Vanilla-vs-flavour comparison: set difference plus changed defaults.
#[derive(Debug, Serialize)]
pub struct FlavourComparison {
    pub vanilla: String,
    pub flavour: String,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed_defaults: Vec<ChangedDefault>,
}

/// Availability tiers that only exist in debug builds; comparing their
/// defaults against a product flavour is meaningless.
fn is_internal_tier(availability: &str) -> bool {
    availability == "develop" || availability == "notproduct"
}

/// Walk the vanilla side once: absent names are removals, shared composite
/// keys with differing non-empty defaults are changes (in encounter order).
/// Then walk the flavour side for additions.
pub fn compare_flavour(
    vanilla_name: &str,
    flavour_name: &str,
    vanilla: &SwitchMap,
    flavour: &SwitchMap,
) -> FlavourComparison {
    let vanilla_names = switch_names(vanilla);
    let flavour_names = switch_names(flavour);

    let mut removed = Vec::new();
    let mut changed_defaults = Vec::new();

    for info in vanilla.values() {
        if is_internal_tier(&info.availability) {
            continue;
        }

        if !flavour_names.contains(info.name.as_str()) {
            removed.push(info.name.clone());
            continue;
        }

        // Composite-key lookup on the vanilla side's exact key: a scoped
        // variant missing from the flavour is simply not comparable.
        let Some(flavour_info) = flavour.get(&info.key()) else {
            continue;
        };

        if !info.default_value.is_empty()
            && !flavour_info.default_value.is_empty()
            && info.default_value != flavour_info.default_value
        {
            changed_defaults.push(ChangedDefault {
                name: info.name.clone(),
                vanilla_value: info.default_value.clone(),
                flavour_value: flavour_info.default_value.clone(),
            });
        }
    }

    let added = flavour
        .values()
        .filter(|info| !vanilla_names.contains(info.name.as_str()))
        .map(|info| info.name.clone())
        .collect();

    FlavourComparison {
        vanilla: vanilla_name.to_string(),
        flavour: flavour_name.to_string(),
        added,
        removed,
        changed_defaults,
    }
}
