use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Placeholder expanded to the directory containing the config file
const WORKSPACE_VAR: &str = "${workspace}";

/// Workspace-level scan configuration.
///
/// Coverage data usually sits in build output directories, so projects can
/// pin those instead of passing roots on every invocation.
#[derive(Debug, Default, Deserialize)]
pub struct ZcovConfig {
    /// Directories to scan for `.zcov` files; `${workspace}` expands to the
    /// directory the config file lives in
    #[serde(default)]
    pub build_directories: Vec<String>,
}

impl ZcovConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Expand `${workspace}` and return the configured roots.
    #[must_use]
    pub fn resolved_roots(&self, workspace: &Path) -> Vec<PathBuf> {
        let workspace = workspace.to_string_lossy();
        self.build_directories
            .iter()
            .map(|dir| PathBuf::from(dir.replace(WORKSPACE_VAR, &workspace)))
            .collect()
    }
}
