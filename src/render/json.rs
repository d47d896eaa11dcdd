//! JSON serialization of the parsed data, for tooling integration and
//! custom rendering pipelines.

use crate::delta::{DeltaTable, FlavourComparison};
use crate::intrinsics::Intrinsic;
use crate::model::{SwitchInfo, SwitchMap};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct SwitchDocument<'a> {
    switches: Vec<&'a SwitchInfo>,
}

#[derive(Serialize)]
struct IntrinsicDocument<'a> {
    intrinsics: &'a [Intrinsic],
}

pub fn switches(map: &SwitchMap) -> Result<String> {
    let document = SwitchDocument {
        switches: map.values().collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

#[derive(Serialize)]
struct DeltaDocument<'a> {
    deltas: &'a [DeltaTable],
}

pub fn deltas(list: &[DeltaTable]) -> Result<String> {
    let document = DeltaDocument { deltas: list };

    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn flavour(comparison: &FlavourComparison) -> Result<String> {
    Ok(serde_json::to_string_pretty(comparison)?)
}

pub fn intrinsics(list: &[Intrinsic]) -> Result<String> {
    let document = IntrinsicDocument { intrinsics: list };

    Ok(serde_json::to_string_pretty(&document)?)
}
