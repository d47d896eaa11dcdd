//! vmopts — scrape JVM command-line switch declarations out of VM source
//! trees and dumps, and render comparison/report pages.
//!
//! One config-driven batch run: every VM listed in the config is parsed in
//! order, rendered to an HTML option table (and optionally JSON), then
//! consecutive versions of the same family get delta pages, configured
//! vanilla/flavour pairs get comparison pages, and VMs with intrinsic
//! tables get intrinsic listings.

mod config;
mod delta;
mod intrinsics;
mod model;
mod parser;
mod render;
mod textutil;
mod vm;

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::VmSpec;
use model::{merge_additive, SinceRegistry, SwitchMap};
use parser::deprecation::DeprecationTable;
use parser::SwitchParser;
use std::fs;
use std::path::{Path, PathBuf};
use vm::VmFamily;

#[derive(Parser)]
#[command(
    name = "vmopts",
    about = "Generate JVM option documentation and comparison pages from VM source trees"
)]
struct Cli {
    /// Run configuration (TOML) listing VMs in ascending release order.
    #[arg(short = 'c', long)]
    config: PathBuf,

    /// Base directory VM paths are resolved against.
    #[arg(short = 'b', long, default_value = ".")]
    base: PathBuf,

    /// Output directory for the rendered HTML pages.
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Also serialize parsed data as JSON into this directory.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = config::load(&cli.config)?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;
    if let Some(json_dir) = &cli.json {
        fs::create_dir_all(json_dir)
            .with_context(|| format!("failed to create JSON directory: {}", json_dir.display()))?;
    }

    // The deprecation table must be complete, in release order, before any
    // HotSpot parse consults it.
    let mut deprecation = DeprecationTable::default();
    for vm in &config.vms {
        if let Some(path) = vm.deprecation_path(&cli.base) {
            deprecation.ingest_file(&path)?;
        }
    }
    if !deprecation.is_empty() {
        println!("deprecation table: {} entries", deprecation.len());
    }

    let mut switch_versions = SinceRegistry::default();
    let mut parsed: Vec<(VmSpec, SwitchMap)> = Vec::new();

    for vm in &config.vms {
        let root = vm.vm_path(&cli.base);
        let mut map = parser::parse_vm(vm.family, &root, &deprecation)
            .with_context(|| format!("failed to parse {}", vm.name))?;

        if let Some(usage) = vm.usage_path(&cli.base) {
            let supplement = parser::xusage::XusageParser
                .parse(&usage)
                .with_context(|| format!("failed to parse usage file for {}", vm.name))?;
            merge_additive(&mut map, supplement);
        }

        if vm.family.tracks_since() {
            for info in map.values_mut() {
                let name = info.name.clone();
                info.since = switch_versions.first_seen(&name, &vm.name);
            }
        }

        let html = render::html::options_page(&vm.name, vm.family, &map);
        write_output(&cli.output.join(vm.html_filename()), &html)?;

        if let Some(json_dir) = &cli.json {
            let json = render::json::switches(&map)?;
            write_output(&json_dir.join(format!("{}.json", vm.safe_name())), &json)?;
        }

        println!("{}: {} options", vm.name, map.len());

        parsed.push((vm.clone(), map));
    }

    render_deltas(cli, &parsed, &deprecation)?;
    render_comparisons(cli, &config.compares, &parsed)?;
    render_intrinsics(cli, &config.vms)?;

    Ok(())
}

/// Delta pages over consecutive same-family VM pairs, in config order.
fn render_deltas(
    cli: &Cli,
    parsed: &[(VmSpec, SwitchMap)],
    deprecation: &DeprecationTable,
) -> Result<()> {
    for family in [VmFamily::Hotspot, VmFamily::Graal, VmFamily::GraalNative] {
        if !family.tracks_deltas() {
            continue;
        }

        let of_family: Vec<&(VmSpec, SwitchMap)> = parsed
            .iter()
            .filter(|(vm, _)| vm.family == family)
            .collect();

        if of_family.len() < 2 {
            continue;
        }

        let mut deltas = Vec::new();

        for pair in of_family.windows(2) {
            let (earlier, earlier_map) = pair[0];
            let (later, later_map) = pair[1];

            let delta = delta::diff(&earlier.name, &later.name, earlier_map, later_map);
            println!(
                "{} to {}: removed {} added {}",
                earlier.name,
                later.name,
                delta.removal_count(),
                delta.addition_count()
            );
            deltas.push(delta);
        }

        let title = format!(
            "Differences between {} versions",
            family.display_name()
        );
        let html = render::html::delta_page(&title, &deltas, deprecation);
        let filename = format!("{}_option_differences.html", family.file_stem());
        write_output(&cli.output.join(filename), &html)?;

        if let Some(json_dir) = &cli.json {
            let json = render::json::deltas(&deltas)?;
            let filename = format!("{}_deltas.json", family.file_stem());
            write_output(&json_dir.join(filename), &json)?;
        }
    }

    Ok(())
}

/// Vanilla-vs-flavour comparison pages for the configured pairs.
fn render_comparisons(
    cli: &Cli,
    compares: &[config::ComparePair],
    parsed: &[(VmSpec, SwitchMap)],
) -> Result<()> {
    for pair in compares {
        let Some((vanilla, vanilla_map)) = find_parsed(parsed, &pair.vanilla) else {
            bail!("comparison references unparsed VM: {}", pair.vanilla);
        };
        let Some((flavour, flavour_map)) = find_parsed(parsed, &pair.flavour) else {
            bail!("comparison references unparsed VM: {}", pair.flavour);
        };

        let comparison =
            delta::compare_flavour(&vanilla.name, &flavour.name, vanilla_map, flavour_map);

        println!(
            "{} vs {}: added {} removed {} changed {}",
            vanilla.name,
            flavour.name,
            comparison.added.len(),
            comparison.removed.len(),
            comparison.changed_defaults.len()
        );

        let html = render::html::flavour_page(&comparison);
        let filename = format!(
            "compare_{}_vs_{}.html",
            vanilla.safe_name(),
            flavour.safe_name()
        );
        write_output(&cli.output.join(filename), &html)?;

        if let Some(json_dir) = &cli.json {
            let json = render::json::flavour(&comparison)?;
            let filename = format!(
                "compare_{}_vs_{}.json",
                vanilla.safe_name(),
                flavour.safe_name()
            );
            write_output(&json_dir.join(filename), &json)?;
        }
    }

    Ok(())
}

/// Intrinsic listings, one page per VM, with "first seen in" stamped across
/// VMs in config (release) order.
fn render_intrinsics(cli: &Cli, vms: &[VmSpec]) -> Result<()> {
    let mut intrinsic_versions = SinceRegistry::default();

    for vm in vms {
        let paths = vm.intrinsics_paths(&cli.base);
        if paths.is_empty() {
            continue;
        }

        let mut intrinsic_parser = intrinsics::IntrinsicParser::new();
        intrinsic_parser
            .parse_files(&paths)
            .with_context(|| format!("failed to parse intrinsics for {}", vm.name))?;

        let mut resolved = intrinsic_parser.intrinsics();
        for intrinsic in &mut resolved {
            intrinsic.since = intrinsic_versions.first_seen(&intrinsic.id, &vm.name);
        }

        println!("{}: {} intrinsics", vm.name, resolved.len());

        let html = render::html::intrinsics_page(&vm.name, &resolved);
        write_output(
            &cli.output.join(format!("{}_intrinsics.html", vm.safe_name())),
            &html,
        )?;

        if let Some(json_dir) = &cli.json {
            let json = render::json::intrinsics(&resolved)?;
            write_output(
                &json_dir.join(format!("{}_intrinsics.json", vm.safe_name())),
                &json,
            )?;
        }
    }

    Ok(())
}

fn find_parsed<'a>(
    parsed: &'a [(VmSpec, SwitchMap)],
    name: &str,
) -> Option<&'a (VmSpec, SwitchMap)> {
    parsed.iter().find(|(vm, _)| vm.name == name)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
