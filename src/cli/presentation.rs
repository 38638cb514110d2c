//! CLI presentation: report types and their text and json formatters.

use crate::checker::CheckReturn;
use crate::config::ModrootConfig;
use crate::error::ApiError;
use crate::installer::Acceptance;
use comfy_table::Table;
use serde::Serialize;

/// Result of `modroot check`
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub path: String,
    pub game: String,
    pub data_dir_name: String,
    /// How the checker classifies the archive root; `None` without a checker
    pub root_check: Option<CheckReturn>,
    pub supported: bool,
    /// Archive base relative to the archive root ("." for the root itself)
    pub base: Option<String>,
    pub acceptance: Option<Acceptance>,
    /// Wrapper folders unwrapped to reach the base
    pub depth: Option<usize>,
    pub files: usize,
    pub digest: String,
}

/// One file of an installation plan
#[derive(Debug, Clone, Serialize)]
pub struct PlannedFile {
    /// Destination relative to the game's data directory
    pub destination: String,
    /// File on disk the destination is copied from
    pub source: Option<String>,
    pub size: u64,
}

/// Result of `modroot plan`
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub path: String,
    pub name: String,
    pub installer: Option<String>,
    pub outcome: String,
    pub error: Option<String>,
    pub files: Vec<PlannedFile>,
    pub digest: Option<String>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn check_return_label(check: Option<CheckReturn>) -> &'static str {
    match check {
        Some(CheckReturn::Valid) => "valid",
        Some(CheckReturn::Fixable) => "fixable",
        Some(CheckReturn::Invalid) => "invalid",
        None => "no checker",
    }
}

pub fn format_check_report(report: &CheckReport, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(report);
    }

    let mut s = format!(
        "Archive: {}\n  Game: {}\n  Data directory: {}\n  Root check: {}\n  Files: {}\n  Digest: {}",
        report.path,
        report.game,
        report.data_dir_name,
        check_return_label(report.root_check),
        report.files,
        report.digest
    );
    match (&report.base, report.acceptance) {
        (Some(base), Some(acceptance)) => {
            let how = match acceptance {
                Acceptance::Valid => "valid data layout",
                Acceptance::DataTextLayer => "data folder with documents",
            };
            s.push_str(&format!(
                "\n\nSupported: yes\n  Base: {}\n  Accepted as: {}\n  Wrappers unwrapped: {}",
                base,
                how,
                report.depth.unwrap_or(0)
            ));
        }
        _ => s.push_str("\n\nSupported: no"),
    }
    Ok(s)
}

pub fn format_plan_report(report: &PlanReport, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(report);
    }

    let mut s = format!(
        "Archive: {}\n  Name: {}\n  Installer: {}\n  Outcome: {}",
        report.path,
        report.name,
        report.installer.as_deref().unwrap_or("none"),
        report.outcome
    );
    if let Some(error) = &report.error {
        s.push_str(&format!("\n  Error: {}", error));
    }
    if let Some(digest) = &report.digest {
        s.push_str(&format!("\n  Digest: {}", digest));
    }
    if !report.files.is_empty() {
        s.push_str(&format!("\n\nFiles ({}):\n", report.files.len()));
        s.push_str(&files_table(&report.files).to_string());
    }
    Ok(s)
}

fn files_table(files: &[PlannedFile]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Destination", "Source", "Size"]);
    for file in files {
        table.add_row(vec![
            file.destination.clone(),
            file.source.clone().unwrap_or_else(|| "-".to_string()),
            file.size.to_string(),
        ]);
    }
    table
}

pub fn format_config(config: &ModrootConfig, format: &str) -> Result<String, ApiError> {
    match format {
        "json" => to_json(config),
        "toml" => config.to_toml(),
        other => Err(ApiError::ConfigError(format!(
            "Unknown output format '{}' (must be 'toml' or 'json')",
            other
        ))),
    }
}
