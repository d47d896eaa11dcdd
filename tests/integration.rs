use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_vmopts")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn run_fixtures(out: &TempDir, json: &TempDir) {
    let config = fixture_path("vms.toml");
    let base = fixture_path("");

    cmd()
        .args(["--config", config.as_str()])
        .args(["--base", base.as_str()])
        .args(["--output", out.path().to_str().unwrap()])
        .args(["--json", json.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("JDK8:"));
}

fn switch_names(json_dir: &TempDir, file: &str) -> Vec<String> {
    let raw = std::fs::read_to_string(json_dir.path().join(file)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    value["switches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn full_run_renders_every_page() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    for page in [
        "hotspot_options_jdk8.html",
        "hotspot_options_jdk9.html",
        "graalvm_ce_options.html",
        "graalvm_ee_options.html",
        "graal_native_ce_options.html",
        "openj9_options.html",
        "zing_jdk8_options.html",
        "hotspot_option_differences.html",
        "graalvm_option_differences.html",
        "compare_graalvm_ce_vs_graalvm_ee.html",
        "jdk8_intrinsics.html",
        "jdk9_intrinsics.html",
    ] {
        assert!(out.path().join(page).exists(), "missing page: {}", page);
    }
}

#[test]
fn hotspot_page_contains_parsed_switches() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    let html =
        std::fs::read_to_string(out.path().join("hotspot_options_jdk8.html")).unwrap();

    assert!(html.contains("UseFastAccessorMethods"));
    assert!(html.contains("Use fast method entry code for accessor methods"));
    // Deprecation metadata from arguments.cpp.
    assert!(html.contains("Deprecated in JDK9"));
    // Range annotation rendered under the default value.
    assert!(html.contains("range(0, max_uintx)"));
    // Xusage supplement merged in.
    assert!(html.contains("mixed mode execution"));
}

#[test]
fn since_column_tracks_first_sighting() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    let raw = std::fs::read_to_string(json.path().join("jdk9.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let switches = value["switches"].as_array().unwrap();

    let since_of = |name: &str| {
        switches
            .iter()
            .find(|s| s["name"] == name)
            .unwrap_or_else(|| panic!("missing switch: {}", name))["since"]
            .as_str()
            .unwrap()
            .to_string()
    };

    assert_eq!(since_of("UseFastAccessorMethods"), "JDK8");
    assert_eq!(since_of("UseNewCode9"), "JDK9");
}

#[test]
fn delta_page_reports_added_and_removed() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    let html =
        std::fs::read_to_string(out.path().join("hotspot_option_differences.html")).unwrap();

    assert!(html.contains("<div>UseNewCode9</div>"));
    assert!(html.contains("UnlockMe"));
    // Removed switch is annotated with its deprecation lifecycle.
    assert!(html.contains("UseOldThing (Deprecated in JDK9, Obsoleted in JDK10)"));
    // Unchanged switches appear in neither column.
    assert!(!html.contains("<div>UseFastAccessorMethods</div>"));
}

#[test]
fn graal_flavour_comparison_tracks_changed_defaults() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    let raw = std::fs::read_to_string(
        json.path().join("compare_graalvm_ce_vs_graalvm_ee.json"),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["added"][0], "UsePriorityInlining");
    assert_eq!(value["changed_defaults"][0]["name"], "CompilerConfiguration");
    assert_eq!(value["changed_defaults"][0]["vanilla_value"], "community");
    assert_eq!(value["changed_defaults"][0]["flavour_value"], "enterprise");
}

#[test]
fn openj9_map_applies_cleanup_rules() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    let names = switch_names(&json, "openj9.json");

    // Placeholder-suffixed form evicts the bare companion.
    assert!(names.contains(&"mso&lt;x&gt;".to_string()));
    assert!(!names.contains(&"mso".to_string()));
    // Only the boolean-enabling form survives.
    assert_eq!(
        names.iter().filter(|n| *n == "UseCompressedRefs").count(),
        1
    );
    // Init-header defines contribute entries too.
    assert!(names.contains(&"nojit".to_string()));
    assert!(names.contains(&"verbose".to_string()));
}

#[test]
fn zing_dump_parses_flag_lines_only() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    let names = switch_names(&json, "zing_jdk8.json");

    assert_eq!(names.len(), 3);
    assert!(names.contains(&"ARTADebugFlags".to_string()));
}

#[test]
fn intrinsics_resolve_and_track_since() {
    let out = TempDir::new().unwrap();
    let json = TempDir::new().unwrap();

    run_fixtures(&out, &json);

    let raw = std::fs::read_to_string(json.path().join("jdk9_intrinsics.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let intrinsics = value["intrinsics"].as_array().unwrap();

    let min = intrinsics.iter().find(|i| i["id"] == "_min").unwrap();
    assert_eq!(min["class"], "java.lang.Math");
    assert_eq!(min["signature"], "(II)I");
    assert_eq!(min["since"], "JDK8");

    let dabs = intrinsics.iter().find(|i| i["id"] == "_dabs").unwrap();
    assert_eq!(dabs["since"], "JDK9");
}

#[test]
fn missing_scan_root_is_fatal() {
    let out = TempDir::new().unwrap();

    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("vms.toml");
    std::fs::write(
        &config_path,
        "[[vm]]\nname = \"JDK8\"\nfamily = \"hotspot\"\npath = \"no/such/tree\"\n",
    )
    .unwrap();

    cmd()
        .args(["--config", config_path.to_str().unwrap()])
        .args(["--base", config_dir.path().to_str().unwrap()])
        .args(["--output", out.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan root"));
}

#[test]
fn comparison_against_unknown_vm_is_rejected() {
    let out = TempDir::new().unwrap();

    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("vms.toml");
    std::fs::write(
        &config_path,
        "[[vm]]\nname = \"Zing\"\nfamily = \"zing\"\npath = \"zing.out\"\n\n[[compare]]\nvanilla = \"Nope\"\nflavour = \"Zing\"\n",
    )
    .unwrap();

    cmd()
        .args(["--config", config_path.to_str().unwrap()])
        .args(["--base", config_dir.path().to_str().unwrap()])
        .args(["--output", out.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown VM"));
}
