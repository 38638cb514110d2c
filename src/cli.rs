//! CLI domain: parse, route, help, output, and presentation only.
//! Stands in for the host application: scans an extracted archive from disk
//! and reports what the installer would do with it.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_check_report, format_config, format_plan_report, CheckReport, PlanReport, PlannedFile,
};
pub use route::RunContext;
