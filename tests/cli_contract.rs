use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn test_root(name: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    std::env::temp_dir().join(format!("civicdir-cli-{name}-{nonce}"))
}

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_civicdir"))
}

fn write_data(root: &Path) {
    fs::create_dir_all(root).expect("create root");
    fs::write(
        root.join("barangays.json"),
        r#"[
            {"slug":"batong-malake","barangay_name":"BATONG MALAKE","trunkline":["536-0001"],
             "officials":[{"name":"JOSE RIZAL","role":"Punong Barangay"}]},
            {"slug":"anos","barangay_name":"ANOS"},
            {"slug":"bambang","barangay_name":"BAMBANG"}
        ]"#,
    )
    .expect("write barangays");
    fs::write(
        root.join("legislation.json"),
        r#"[
            {"id":"ord-2024-01","type":"ordinance","number":"Ord. 2024-01","title":"Traffic Code"},
            {"id":"res-2024-07","type":"resolution","number":"Res. 2024-07","title":"Tree Planting Drive"},
            {"id":"eo-2024-03","type":"executive_order","number":"EO 2024-03","title":"Traffic Task Force"}
        ]"#,
    )
    .expect("write legislation");
}

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(["--cli", "--data-dir", root.to_string_lossy().as_ref()])
        .args(args)
        .output()
        .expect("run cli")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn cli_renders_filtered_listing_from_url() {
    let root = test_root("search");
    write_data(&root);

    let output = run(&root, &["/government/barangays?search=bam"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "Local Barangays");
    assert_eq!(lines[1], "/government/barangays?search=bam");
    assert_eq!(lines[2], "1 of 3 component barangays");
    assert!(lines[3].starts_with("Bambang"));
    assert_eq!(lines.len(), 4);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_flags_write_canonical_url() {
    let root = test_root("flags");
    write_data(&root);

    let output = run(&root, &["/legislation", "--search", "traffic", "--type", "all"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[1], "/legislation?search=traffic");
    assert_eq!(lines[2], "All Documents | 2 of 3 documents");

    let typed = run(&root, &["/legislation?search=traffic", "--type", "executive_order"]);
    let lines = stdout_lines(&typed);
    assert_eq!(lines[1], "/legislation?search=traffic&type=executive_order");
    assert_eq!(lines[2], "Executive Orders | 1 of 3 documents");
    assert!(lines[3].contains("Traffic Task Force"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_type_flag_is_ignored_on_untyped_pages() {
    let root = test_root("untyped");
    write_data(&root);

    let output = run(&root, &["/government/barangays", "--type", "ordinance", "--search", "bam"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[1], "/government/barangays?search=bam");
    assert_eq!(lines[2], "1 of 3 component barangays");

    let json = run(&root, &["/government/barangays", "--type", "ordinance", "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).expect("parse json output");
    assert!(value["type"].is_null());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_ignores_unknown_type_token() {
    let root = test_root("bogus-type");
    write_data(&root);

    let output = run(&root, &["/legislation?type=proclamation"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[2], "All Documents | 3 documents");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_clips_listing_at_limit() {
    let root = test_root("limit");
    write_data(&root);

    let output = run(&root, &["/government/barangays", "--limit", "1"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[3].starts_with("Anos"));
    assert_eq!(lines[4], "... (2 more)");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_prints_json_in_display_order() {
    let root = test_root("json");
    write_data(&root);

    let output = run(&root, &["/legislation?type=ordinance", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parse json output");
    assert_eq!(value["page"], "/legislation");
    assert_eq!(value["type"], "ordinance");
    let items = value["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "ord-2024-01");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn cli_returns_non_zero_when_data_dir_does_not_exist() {
    let missing = test_root("missing");
    let output = run(&missing, &["/government/barangays"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open data directory"));
}
