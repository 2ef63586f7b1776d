use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigurationError, Result},
    filters::{FilterDefinition, FilterKind},
    imaging::{WorkingSpace, DEFAULT_TILE_ALIGNMENT, MAX_TILE_ALIGNMENT},
};

/// Main configuration for snap-filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processing context settings
    pub context: ContextConfig,

    /// Renderer settings
    pub render: RenderConfig,

    /// Output file settings
    pub output: OutputConfig,

    /// Filters to render instead of the built-in catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterDefinition>>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigurationError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigurationError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigurationError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.context.validate()?;
        self.render.validate()?;
        self.output.validate()?;

        if let Some(filters) = &self.filters {
            for filter in filters {
                filter.validate()?;
            }
        }
        Ok(())
    }
}

/// Processing context configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Color space operations compute in
    pub working_space: WorkingSpace,

    /// Working canvases are rounded up to a multiple of this many pixels
    pub tile_alignment: u32,

    /// Operations the context should not provide
    pub disabled_operations: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            working_space: WorkingSpace::default(),
            tile_alignment: DEFAULT_TILE_ALIGNMENT,
            disabled_operations: Vec::new(),
        }
    }
}

impl ContextConfig {
    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if !(1..=MAX_TILE_ALIGNMENT).contains(&self.tile_alignment) {
            return Err(ConfigurationError::InvalidValue {
                key: "context.tile_alignment".to_string(),
                value: self.tile_alignment.to_string(),
            });
        }

        for name in &self.disabled_operations {
            name.parse::<FilterKind>()?;
        }

        Ok(())
    }
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render the filters of a batch in parallel
    pub parallel: bool,

    /// Number of rendering threads
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: num_cpus::get(),
        }
    }
}

impl RenderConfig {
    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if self.threads == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "render.threads".to_string(),
                value: self.threads.to_string(),
            });
        }
        Ok(())
    }
}

/// Output file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix of every written preview file
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: "filtered".to_string(),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        let prefix = self.file_prefix.as_str();
        if prefix.is_empty() || prefix.trim() != prefix || prefix.contains(['/', '\\']) {
            return Err(ConfigurationError::InvalidValue {
                key: "output.file_prefix".to_string(),
                value: self.file_prefix.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SepiaToneParams;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.context.working_space = WorkingSpace::Linear;
        original_config.filters = Some(vec![
            FilterDefinition::SepiaTone(SepiaToneParams::new(0.25)),
            FilterDefinition::PhotoEffectNoir,
        ]);

        // Save and load
        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[render]\nparallel = false\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert!(!config.render.parallel);
        assert_eq!(config.context.tile_alignment, DEFAULT_TILE_ALIGNMENT);
        assert!(config.filters.is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PipelineError::Configuration(ConfigurationError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_operation_in_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        std::fs::write(&file_path, "[[filters]]\noperation = \"posterize\"\n").unwrap();

        let err = Config::from_file(&file_path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PipelineError::Configuration(ConfigurationError::ParseFailed { .. })
        ));
    }

    #[test]
    fn test_invalid_tile_alignment() {
        let mut config = Config::default();
        config.context.tile_alignment = 0;
        assert!(config.validate().is_err());

        config.context.tile_alignment = 1 << 20;
        assert!(config.validate().is_err());

        config.context.tile_alignment = MAX_TILE_ALIGNMENT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_disabled_operation() {
        let mut config = Config::default();
        config.context.disabled_operations = vec!["vhs".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_thread_count() {
        let mut config = Config::default();
        config.render.threads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_output_prefix() {
        let mut config = Config::default();
        config.output.file_prefix = "../up".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_prefix_with_surrounding_whitespace() {
        let mut config = Config::default();
        config.output.file_prefix = " preview ".to_string();
        assert!(config.validate().is_err());

        config.output.file_prefix = "   ".to_string();
        assert!(config.validate().is_err());

        config.output.file_prefix = "preview".to_string();
        assert!(config.validate().is_ok());
    }
}
