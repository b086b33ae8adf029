//! Transform settings loaded from JSON documents, for example
//! `{ "weights": "borgefors", "normalize": false }`
//! or `{ "weights": [1.0, 1.5] }`.

use crate::chamfer::ChamferTransform;
use crate::distance_map::DistanceStorage;
use crate::error::{ChamferError, Result};
use crate::weights::{ChamferWeights, WeightPreset};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Either a named preset or an explicit weight array.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(untagged)]
pub enum WeightsConfig {
    Preset(WeightPreset),
    Explicit(Vec<f32>),
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct TransformConfig {
    pub weights: WeightsConfig,

    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_normalize() -> bool {
    true
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            weights: WeightsConfig::Preset(WeightPreset::Borgefors),
            normalize: default_normalize(),
        }
    }
}

impl WeightsConfig {
    pub fn to_weights(&self) -> Result<ChamferWeights> {
        match self {
            WeightsConfig::Preset(preset) => Ok(ChamferWeights::from_preset(*preset)),
            WeightsConfig::Explicit(weights) => ChamferWeights::new(weights.clone()),
        }
    }
}

impl TransformConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ChamferError::Io {
            path: path.to_path_buf(), source
        })?;

        Self::from_json_str(&contents)
    }

    /// Validate the weights and create the 3x3 transform.
    pub fn build<D: DistanceStorage>(&self) -> Result<ChamferTransform<D>> {
        Ok(ChamferTransform::new(self.weights.to_weights()?, self.normalize))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_map::F32DistanceStorage;

    #[test]
    fn parses_preset_names(){
        let config = TransformConfig::from_json_str(r#"{ "weights": "quasi-euclidean", "normalize": false }"#).unwrap();
        assert_eq!(config.weights, WeightsConfig::Preset(WeightPreset::QuasiEuclidean));
        assert!(!config.normalize);
    }

    #[test]
    fn parses_explicit_weights_and_defaults_to_normalizing(){
        let config = TransformConfig::from_json_str(r#"{ "weights": [2.0, 3.0] }"#).unwrap();
        assert!(config.normalize);

        let transform = config.build::<F32DistanceStorage>().unwrap();
        assert_eq!(transform.weights().as_slice(), &[2.0, 3.0]);
        assert!(transform.normalizes());
    }

    #[test]
    fn rejects_invalid_weights_when_building(){
        let config = TransformConfig::from_json_str(r#"{ "weights": [1.0] }"#).unwrap();
        assert!(matches!(
            config.build::<F32DistanceStorage>(),
            Err(ChamferError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_unknown_presets_and_malformed_documents(){
        assert!(matches!(
            TransformConfig::from_json_str(r#"{ "weights": "euclidean" }"#),
            Err(ChamferError::Config(_))
        ));

        assert!(TransformConfig::from_json_str("{").is_err());
    }

    #[test]
    fn reports_missing_files(){
        let result = TransformConfig::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ChamferError::Io { .. })));
    }
}
