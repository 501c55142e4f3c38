//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Workspace opened on startup when the config doesn't remember one
pub const DEFAULT_WORKSPACE_ID: &str = "default";

/// File extension for persisted workspaces
pub const WORKSPACE_FILE_EXTENSION: &str = "json";

/// Target frame rate of the headless schedule runner
pub const RUNNER_FRAMES_PER_SECOND: f64 = 60.0;

/// Smallest history limit accepted from config.
/// A limit of zero would make the current snapshot unreachable.
pub const MIN_HISTORY_LIMIT: usize = 1;
