//! CLI commands run through the route table

use super::test_utils::{extract_listing, with_xdg_env, write_file};
use clap::Parser;
use modroot::cli::{Cli, RunContext};
use tempfile::TempDir;

fn run(test_dir: &TempDir, args: &[&str]) -> Result<String, modroot::error::ApiError> {
    let cli = Cli::try_parse_from(args).unwrap();
    with_xdg_env(test_dir, || {
        let context = RunContext::new(cli.workspace.clone(), cli.config.clone())?;
        context.execute(&cli.command)
    })
}

#[test]
fn test_plan_command_text() {
    let test_dir = TempDir::new().unwrap();
    let archive = TempDir::new().unwrap();
    extract_listing(
        archive.path(),
        &["MyMod/Data/script.pex", "MyMod/readme.txt", "MyMod/license.pdf"],
    );
    let workspace = test_dir.path().to_string_lossy().to_string();
    let dir = archive.path().to_string_lossy().to_string();

    let out = run(
        &test_dir,
        &["modroot", "--workspace", &workspace, "plan", &dir, "--name", "My Mod"],
    )
    .unwrap();
    assert!(out.contains("Name: My Mod"));
    assert!(out.contains("Outcome: installed"));
    let row = out
        .lines()
        .find(|line| line.contains("MyMod/Data/script.pex"))
        .unwrap();
    assert!(row.starts_with('│') && row.contains(" script.pex "));
    assert!(!out.contains("readme.txt"));
}

#[test]
fn test_plan_keep_documents_flag() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    // The layout checker would strip the kept readme again.
    write_file(
        workspace.path(),
        "config/config.toml",
        "[game]\nchecker = \"non-empty\"\n",
    );
    let archive = TempDir::new().unwrap();
    extract_listing(archive.path(), &["Data/x.esp", "readme.txt"]);
    let ws = workspace.path().to_string_lossy().to_string();
    let dir = archive.path().to_string_lossy().to_string();

    let out = run(
        &test_dir,
        &[
            "modroot",
            "--workspace",
            &ws,
            "plan",
            &dir,
            "--keep-documents",
            "--format",
            "json",
        ],
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let destinations: Vec<&str> = value["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["destination"].as_str().unwrap())
        .collect();
    assert_eq!(destinations, vec!["x.esp", "readme.txt"]);
}

#[test]
fn test_check_uses_workspace_config() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_file(
        workspace.path(),
        "config/config.toml",
        "[game]\nchecker = \"none\"\n",
    );
    let archive = TempDir::new().unwrap();
    extract_listing(archive.path(), &["meshes/a.nif"]);
    let ws = workspace.path().to_string_lossy().to_string();
    let dir = archive.path().to_string_lossy().to_string();

    let out = run(
        &test_dir,
        &["modroot", "--workspace", &ws, "check", &dir, "--format", "json"],
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["supported"], false);
    assert!(value["root_check"].is_null());
}

#[test]
fn test_config_command_prints_effective_config() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("custom.toml");
    std::fs::write(&config_file, "[installer]\npriority = 7\n").unwrap();
    let config_path = config_file.to_string_lossy().to_string();

    let out = run(
        &test_dir,
        &["modroot", "--config", &config_path, "config", "--format", "json"],
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["installer"]["priority"], 7);
    assert_eq!(value["game"]["checker"], "layout");
}

#[test]
fn test_invalid_workspace_config_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_file(
        workspace.path(),
        "config/config.toml",
        "[logging]\nformat = \"xml\"\n",
    );
    let ws = workspace.path().to_string_lossy().to_string();

    let err = run(&test_dir, &["modroot", "--workspace", &ws, "config"]).unwrap_err();
    assert!(err.to_string().contains("Unknown log format"));
}
