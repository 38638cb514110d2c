//! Merge rules for configuration layers

pub mod merge_policy;
