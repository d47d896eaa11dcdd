//! Run configuration — which VMs to scan, in which order, and which
//! flavour comparisons to produce.
//!
//! The config file is TOML. VMs must be listed in ascending release order
//! within each family: the "first seen in" registry and the deprecation
//! table both depend on that ordering.

use crate::vm::VmFamily;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    #[serde(default, rename = "vm")]
    pub vms: Vec<VmSpec>,
    #[serde(default, rename = "compare")]
    pub compares: Vec<ComparePair>,
}

/// One VM to scan: a source tree or dump file plus optional supplements.
/// Immutable for the duration of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct VmSpec {
    /// Display/version name, e.g. "JDK8" or "Zing JDK11".
    pub name: String,
    pub family: VmFamily,
    /// Root directory (HotSpot, OpenJ9) or dump file (Graal, Zing),
    /// relative to the base directory.
    pub path: PathBuf,
    /// Xusage text or launcher .properties resource, relative to `path`.
    #[serde(default)]
    pub usage_file: Option<PathBuf>,
    /// arguments.cpp-equivalent with the special-flags table, relative to
    /// `path`.
    #[serde(default)]
    pub deprecation_file: Option<PathBuf>,
    /// vmSymbols.hpp-equivalents with the intrinsic macro tables, relative
    /// to `path`.
    #[serde(default)]
    pub intrinsics_files: Vec<PathBuf>,
}

/// A vanilla-vs-flavour comparison, referencing VMs by name.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparePair {
    pub vanilla: String,
    pub flavour: String,
}

impl VmSpec {
    pub fn vm_path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    pub fn usage_path(&self, base: &Path) -> Option<PathBuf> {
        self.usage_file.as_ref().map(|f| self.vm_path(base).join(f))
    }

    pub fn deprecation_path(&self, base: &Path) -> Option<PathBuf> {
        self.deprecation_file
            .as_ref()
            .map(|f| self.vm_path(base).join(f))
    }

    pub fn intrinsics_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.intrinsics_files
            .iter()
            .map(|f| self.vm_path(base).join(f))
            .collect()
    }

    /// Name with filesystem-hostile characters flattened, for output files.
    pub fn safe_name(&self) -> String {
        self.name.replace([' ', '-'], "_").to_lowercase()
    }

    pub fn html_filename(&self) -> String {
        match self.family {
            VmFamily::Hotspot => format!("hotspot_options_{}.html", self.safe_name()),
            VmFamily::Openj9 => "openj9_options.html".to_string(),
            _ => format!("{}_options.html", self.safe_name()),
        }
    }
}

/// Load and validate a run configuration.
pub fn load(path: &Path) -> Result<RunConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;

    let config: RunConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    if config.vms.is_empty() {
        bail!("config declares no [[vm]] entries: {}", path.display());
    }

    for pair in &config.compares {
        for name in [&pair.vanilla, &pair.flavour] {
            if !config.vms.iter().any(|vm| &vm.name == name) {
                bail!("[[compare]] references unknown VM: {}", name);
            }
        }
    }

    Ok(config)
}
