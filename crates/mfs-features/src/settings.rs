//! Summarizer Settings

use crate::error::ConfigError;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `MFS__PARAMS__PREPROCESSING=laplacian`
pub const ENV_PREFIX: &str = "MFS";

/// Differential transform applied to the masked volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preprocessing {
    /// Masked raw intensities
    #[default]
    None,
    /// Gradient magnitude
    Gradient,
    /// Discrete Laplacian
    Laplacian,
}

impl Preprocessing {
    /// Resolve legacy `gradient` / `laplacian` flags; gradient wins when both are set
    pub fn from_flags(gradient: bool, laplacian: bool) -> Self {
        if gradient {
            Preprocessing::Gradient
        } else if laplacian {
            Preprocessing::Laplacian
        } else {
            Preprocessing::None
        }
    }
}

/// Estimator parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawEstimatorParams", into = "RawEstimatorParams")]
pub struct EstimatorParams {
    /// Selected preprocessing
    pub preprocessing: Preprocessing,
    /// Estimator-specific options passed through untouched
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl EstimatorParams {
    pub fn with_preprocessing(preprocessing: Preprocessing) -> Self {
        Self {
            preprocessing,
            ..Default::default()
        }
    }

    /// Look up a pass-through option
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Wire form accepting both the `preprocessing` key and legacy boolean flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawEstimatorParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preprocessing: Option<Preprocessing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gradient: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    laplacian: Option<bool>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<RawEstimatorParams> for EstimatorParams {
    type Error = ConfigError;

    fn try_from(raw: RawEstimatorParams) -> Result<Self, Self::Error> {
        let gradient = raw.gradient.unwrap_or(false);
        let laplacian = raw.laplacian.unwrap_or(false);
        let legacy =
            (gradient || laplacian).then(|| Preprocessing::from_flags(gradient, laplacian));

        let preprocessing = match (raw.preprocessing, legacy) {
            (Some(explicit), Some(flagged)) if explicit != flagged => {
                return Err(ConfigError::Invalid(format!(
                    "preprocessing = {explicit:?} conflicts with legacy flags selecting {flagged:?}"
                )));
            }
            (Some(explicit), _) => explicit,
            (None, Some(flagged)) => flagged,
            (None, None) => Preprocessing::None,
        };

        Ok(Self {
            preprocessing,
            extra: raw.extra,
        })
    }
}

impl From<EstimatorParams> for RawEstimatorParams {
    fn from(params: EstimatorParams) -> Self {
        Self {
            preprocessing: Some(params.preprocessing),
            gradient: None,
            laplacian: None,
            extra: params.extra,
        }
    }
}

/// Settings for one feature extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Levels averaged when computing the density (1 = raw measure, >= 6 = density)
    pub averaging_levels: usize,
    /// Length of the MFS vector
    pub dimension_vector_size: usize,
    /// Levels used per MFS point
    pub iteration_levels: usize,
    /// `.npz` container holding the structure array "S"
    pub structure_path: PathBuf,
    /// `.npz` container holding the mask array "M"
    pub mask_path: PathBuf,
    pub params: EstimatorParams,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            averaging_levels: 1,
            dimension_vector_size: 20,
            iteration_levels: 20,
            structure_path: PathBuf::new(),
            mask_path: PathBuf::new(),
            params: EstimatorParams::default(),
        }
    }
}

impl SummarizerConfig {
    /// Build and validate a configuration
    pub fn new(
        averaging_levels: usize,
        dimension_vector_size: usize,
        iteration_levels: usize,
        structure_path: impl Into<PathBuf>,
        mask_path: impl Into<PathBuf>,
        params: EstimatorParams,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            averaging_levels,
            dimension_vector_size,
            iteration_levels,
            structure_path: structure_path.into(),
            mask_path: mask_path.into(),
            params,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a file (format by extension) with `MFS__`-prefixed environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: impl AsRef<Path>, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check level counts and input paths
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("averaging_levels", self.averaging_levels),
            ("dimension_vector_size", self.dimension_vector_size),
            ("iteration_levels", self.iteration_levels),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        if self.structure_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("structure_path is empty".to_string()));
        }
        if self.mask_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("mask_path is empty".to_string()));
        }
        Ok(())
    }

    /// Builder-style preprocessing override
    pub fn with_preprocessing(mut self, preprocessing: Preprocessing) -> Self {
        self.params.preprocessing = preprocessing;
        self
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_from_json(json: &str) -> Result<EstimatorParams, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_flags_gradient_precedence() {
        assert_eq!(Preprocessing::from_flags(true, true), Preprocessing::Gradient);
        assert_eq!(Preprocessing::from_flags(false, true), Preprocessing::Laplacian);
        assert_eq!(Preprocessing::from_flags(false, false), Preprocessing::None);
    }

    #[test]
    fn test_legacy_flags() {
        let params = params_from_json(r#"{"gradient": false, "laplacian": true}"#).unwrap();
        assert_eq!(params.preprocessing, Preprocessing::Laplacian);
    }

    #[test]
    fn test_explicit_preprocessing_with_extras() {
        let params = params_from_json(r#"{"preprocessing": "gradient", "threshold": 40}"#).unwrap();
        assert_eq!(params.preprocessing, Preprocessing::Gradient);
        assert_eq!(params.extra("threshold"), Some(&serde_json::json!(40)));
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(params_from_json(r#"{"preprocessing": "none", "laplacian": true}"#).is_err());
        // A false legacy flag never conflicts
        assert!(params_from_json(r#"{"preprocessing": "laplacian", "gradient": false}"#).is_ok());
    }

    #[test]
    fn test_params_serialize_roundtrip() {
        let mut params = EstimatorParams::with_preprocessing(Preprocessing::Laplacian);
        params.extra.insert("zero".to_string(), serde_json::json!(true));
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(params_from_json(&json).unwrap(), params);
    }

    #[test]
    fn test_validate_rejects_zero_levels() {
        let err = SummarizerConfig::new(0, 20, 20, "s.npz", "m.npz", EstimatorParams::default());
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        assert!(SummarizerConfig::default().validate().is_err());
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mfs.toml");
        std::fs::write(
            &path,
            r#"
averaging_levels = 6
dimension_vector_size = 10
iteration_levels = 8
structure_path = "/data/sample_s.npz"
mask_path = "/data/sample_m.npz"

[params]
gradient = true
"#,
        )
        .unwrap();

        let config = SummarizerConfig::load(&path).unwrap();
        assert_eq!(config.averaging_levels, 6);
        assert_eq!(config.dimension_vector_size, 10);
        assert_eq!(config.iteration_levels, 8);
        assert_eq!(config.structure_path, PathBuf::from("/data/sample_s.npz"));
        assert_eq!(config.params.preprocessing, Preprocessing::Gradient);
    }

    #[test]
    fn test_load_environment_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mfs.toml");
        std::fs::write(
            &path,
            r#"
iteration_levels = 3
structure_path = "/data/sample_s.npz"
mask_path = "/data/sample_m.npz"
"#,
        )
        .unwrap();

        let vars = ::config::Map::from([
            ("MFS__ITERATION_LEVELS".to_string(), "7".to_string()),
            ("MFS__PARAMS__PREPROCESSING".to_string(), "laplacian".to_string()),
            ("OTHER__ITERATION_LEVELS".to_string(), "9".to_string()),
        ]);
        let env = environment().source(Some(vars));
        let config = SummarizerConfig::load_with_env(&path, env).unwrap();

        assert_eq!(config.iteration_levels, 7);
        assert_eq!(config.params.preprocessing, Preprocessing::Laplacian);
        assert_eq!(config.averaging_levels, 1);
        assert_eq!(config.mask_path, PathBuf::from("/data/sample_m.npz"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SummarizerConfig::load("/nonexistent/mfs.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
