//! Config loading, validation, and path matching.

use super::model::Config;
use crate::error::{KerfError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

impl Config {
    /// Load config from the YAML file at `path`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// a configuration error. Unknown fields in the YAML are silently
    /// ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            KerfError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| KerfError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return an error on invalid values.
    ///
    /// Validation rules:
    /// - `base` must be non-empty
    /// - `watch_interval_ms` must be positive
    /// - `include`/`exclude` entries must be valid glob patterns
    pub fn validate(&self) -> Result<()> {
        if self.base.is_empty() {
            return Err(KerfError::ConfigError(
                "base must be a non-empty revision".to_string(),
            ));
        }

        if self.watch_interval_ms == 0 {
            return Err(KerfError::ConfigError(
                "watch_interval_ms must be greater than 0".to_string(),
            ));
        }

        // Compiling the matcher validates every glob pattern.
        self.matcher()?;

        Ok(())
    }

    /// Build the compiled include/exclude matcher for this config.
    pub fn matcher(&self) -> Result<PathMatcher> {
        let include = if self.include.is_empty() {
            None
        } else {
            Some(build_glob_set(&self.include)?)
        };
        let exclude = build_glob_set(&self.exclude)?;

        Ok(PathMatcher { include, exclude })
    }
}

/// Compiled include/exclude filter over repo-relative paths.
#[derive(Debug)]
pub struct PathMatcher {
    /// None means "include everything".
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl PathMatcher {
    /// True when `path` should be classified.
    pub fn is_match(&self, path: &str) -> bool {
        if let Some(include) = &self.include
            && !include.is_match(path)
        {
            return false;
        }
        !self.exclude.is_match(path)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            KerfError::ConfigError(format!("invalid glob pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| KerfError::ConfigError(format!("failed to compile glob patterns: {}", e)))
}
