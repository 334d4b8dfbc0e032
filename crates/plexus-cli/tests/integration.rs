//! Integration tests for the plexus CLI
//!
//! These tests run full command workflows against element files written to
//! temporary workspaces.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a Command for the plexus binary rooted in `workspace`
#[allow(deprecated)]
fn plexus(workspace: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("plexus").expect("Failed to find plexus binary");
    cmd.env("HOME", workspace.path().join("home"))
        .env_remove("PLEXUS_WORKSPACE")
        .env_remove("PLEXUS_INPUT_FORMAT")
        .env_remove("PLEXUS_LOG")
        .current_dir(workspace.path());
    cmd
}

const ELEMENTS: &str = r#"[
    {"class": "Edge", "group": "BasicEdge", "source": "junctionA", "destination": "junctionB", "directed": true, "properties": {"count": 2}},
    {"class": "Edge", "group": "BasicEdge2", "source": "junctionA", "destination": "junctionB", "directed": true, "properties": {"count": 1}},
    {"class": "Edge", "group": "BasicEdge", "source": "junctionA", "destination": "junctionB", "directed": true, "properties": {"count": 4}},
    {"class": "Entity", "group": "BasicEntity", "vertex": "vertex1", "properties": {"count": 3}},
    {"class": "Entity", "group": "BasicEntity2", "vertex": "vertex2", "properties": {"count": 4}}
]"#;

/// Create a workspace containing `elements.json`
fn setup_workspace() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let input = temp.path().join("elements.json");
    std::fs::write(&input, ELEMENTS).expect("Failed to write elements");
    (temp, input)
}

/// Run a command and parse stdout as JSON
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is not JSON")
}

fn groups_of(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|e| e["group"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Filter Command
// ============================================================================

#[test]
fn test_filter_edge_group_allow_list() {
    let (workspace, input) = setup_workspace();

    let kept = run_json(plexus(&workspace).args([
        "filter",
        "--input",
        input.to_str().unwrap(),
        "--edge",
        "BasicEdge2",
    ]));

    // entities pass: no entity group is registered
    assert_eq!(
        groups_of(&kept),
        vec!["BasicEdge2", "BasicEntity", "BasicEntity2"]
    );
}

#[test]
fn test_filter_more_than() {
    let (workspace, input) = setup_workspace();

    let kept = run_json(plexus(&workspace).args([
        "filter",
        "--input",
        input.to_str().unwrap(),
        "--more-than",
        "count=2",
    ]));

    assert_eq!(groups_of(&kept), vec!["BasicEdge", "BasicEntity", "BasicEntity2"]);
    assert_eq!(kept[0]["properties"]["count"], 4);
}

#[test]
fn test_filter_combined() {
    let (workspace, input) = setup_workspace();

    let kept = run_json(plexus(&workspace).args([
        "filter",
        "--input",
        input.to_str().unwrap(),
        "--edge",
        "BasicEdge",
        "--entity",
        "BasicEntity2",
        "--more-than",
        "count=1",
    ]));

    assert_eq!(groups_of(&kept), vec!["BasicEdge", "BasicEdge", "BasicEntity2"]);
}

#[test]
fn test_filter_without_configuration_keeps_nothing() {
    let (workspace, input) = setup_workspace();

    plexus(&workspace)
        .args(["filter", "--input", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(predicate::str::contains("keeps nothing"));
}

#[test]
fn test_filter_json_lines_input() {
    let (workspace, _) = setup_workspace();
    let input = workspace.path().join("elements.jsonl");
    let lines: Vec<String> = serde_json::from_str::<Vec<Value>>(ELEMENTS)
        .unwrap()
        .iter()
        .map(|e| e.to_string())
        .collect();
    std::fs::write(&input, lines.join("\n")).unwrap();

    let kept = run_json(plexus(&workspace).args([
        "--format",
        "json-lines",
        "filter",
        "--input",
        input.to_str().unwrap(),
        "--edge",
        "BasicEdge2",
        "--entity",
        "BasicEntity",
    ]));

    assert_eq!(groups_of(&kept), vec!["BasicEdge2", "BasicEntity"]);
}

#[test]
fn test_filter_incomparable_property_fails() {
    let (workspace, _) = setup_workspace();
    let input = workspace.path().join("strings.json");
    std::fs::write(
        &input,
        r#"[{"class": "Entity", "group": "BasicEntity", "vertex": "v", "properties": {"count": "many"}}]"#,
    )
    .unwrap();

    plexus(&workspace)
        .args(["filter", "--input", input.to_str().unwrap(), "--more-than", "count=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot compare string with int"));
}

#[test]
fn test_filter_missing_file_fails() {
    let (workspace, _) = setup_workspace();

    plexus(&workspace)
        .args(["filter", "--input", "missing.json", "--edge", "BasicEdge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

// ============================================================================
// Stats Command
// ============================================================================

#[test]
fn test_stats_json() {
    let (workspace, input) = setup_workspace();

    let stats = run_json(plexus(&workspace).args([
        "stats",
        "--input",
        input.to_str().unwrap(),
        "--json",
    ]));

    assert_eq!(stats["total"], 5);
    assert_eq!(stats["edges"], 3);
    assert_eq!(stats["entities"], 2);
    assert_eq!(stats["edge_groups"]["BasicEdge"], 2);
    assert_eq!(stats["properties"], serde_json::json!(["count"]));
}

#[test]
fn test_stats_text() {
    let (workspace, input) = setup_workspace();

    plexus(&workspace)
        .args(["stats", "--input", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elements: 5"))
        .stdout(predicate::str::contains("BasicEntity2: 1"))
        .stdout(predicate::str::contains("Properties: count"));
}

// ============================================================================
// Config Command
// ============================================================================

#[test]
fn test_config_init_then_show() {
    let (workspace, _) = setup_workspace();

    plexus(&workspace)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(workspace.path().join(".plexus/config.toml").exists());

    plexus(&workspace)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let shown = run_json(plexus(&workspace).args(["config", "show", "--json"]));
    assert_eq!(shown["logging"]["level"], "info");
    assert_eq!(shown["input"]["format"], "json");
}

#[test]
fn test_local_config_sets_input_format() {
    let (workspace, _) = setup_workspace();
    let config_dir = workspace.path().join(".plexus");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[input]\nformat = \"json-lines\"\n",
    )
    .unwrap();
    let input = workspace.path().join("one.jsonl");
    std::fs::write(
        &input,
        r#"{"class": "Entity", "group": "BasicEntity", "vertex": "v", "properties": {"count": 3}}"#,
    )
    .unwrap();

    let kept = run_json(plexus(&workspace).args([
        "filter",
        "--input",
        input.to_str().unwrap(),
        "--entity",
        "BasicEntity",
    ]));

    assert_eq!(groups_of(&kept), vec!["BasicEntity"]);
}

#[test]
fn test_local_config_resets_global_values() {
    let (workspace, _) = setup_workspace();
    let global_dir = workspace.path().join("home").join(".plexus");
    std::fs::create_dir_all(&global_dir).unwrap();
    std::fs::write(
        global_dir.join("config.toml"),
        "[logging]\nlevel = \"debug\"\n\n[output]\npretty = true\n",
    )
    .unwrap();
    let local_dir = workspace.path().join(".plexus");
    std::fs::create_dir_all(&local_dir).unwrap();
    std::fs::write(
        local_dir.join("config.toml"),
        "[logging]\nlevel = \"info\"\n\n[output]\npretty = false\n",
    )
    .unwrap();

    let shown = run_json(plexus(&workspace).args(["config", "show", "--json"]));

    assert_eq!(shown["logging"]["level"], "info");
    assert_eq!(shown["output"]["pretty"], false);
}

#[test]
fn test_config_init_keeps_global_values() {
    let (workspace, _) = setup_workspace();
    let global_dir = workspace.path().join("home").join(".plexus");
    std::fs::create_dir_all(&global_dir).unwrap();
    std::fs::write(global_dir.join("config.toml"), "[input]\nformat = \"json-lines\"\n").unwrap();

    plexus(&workspace).args(["config", "init"]).assert().success();
    let shown = run_json(plexus(&workspace).args(["config", "show", "--json"]));

    assert_eq!(shown["input"]["format"], "json-lines");
}

#[test]
fn test_config_path_json() {
    let (workspace, _) = setup_workspace();

    let paths = run_json(plexus(&workspace).args(["config", "path", "--json"]));

    assert_eq!(paths["local_exists"], false);
    assert!(paths["local"]
        .as_str()
        .unwrap()
        .ends_with(".plexus/config.toml"));
}

#[test]
fn test_invalid_config_level_fails() {
    let (workspace, _) = setup_workspace();
    let config_dir = workspace.path().join(".plexus");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[logging]\nlevel = \"loud\"\n").unwrap();

    plexus(&workspace)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.level"));
}
