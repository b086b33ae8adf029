use crate::error::{ChamferError, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Weight class of orthogonal steps (`|dx| + |dy| = 1`).
pub const ORTHOGONAL: usize = 0;

/// Weight class of diagonal steps (`|dx| = |dy| = 1`).
pub const DIAGONAL: usize = 1;


/// Step costs indexed by neighbour offset class.
/// Index 0 is the orthogonal weight, index 1 the diagonal weight.
/// Further entries (knight moves and the like) are accepted
/// but ignored by the 3x3 mask.
///
/// A diagonal weight smaller than the orthogonal one is unusual
/// but accepted.
#[derive(Clone, PartialEq, Debug)]
pub struct ChamferWeights {
    weights: Vec<f32>,
}

/// Named weight sets.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightPreset {
    /// Every neighbour of the 3x3 mask costs 1.
    Chessboard,

    /// Diagonal steps cost two orthogonal steps.
    CityBlock,

    /// Diagonal steps cost `sqrt(2)`.
    QuasiEuclidean,

    /// Integer weights (3, 4).
    Borgefors,

    /// Integer weights (2, 3).
    #[serde(rename = "weights-23")]
    Weights23,

    /// Integer weights (5, 7).
    #[serde(rename = "weights-57")]
    Weights57,

    /// Integer weights (5, 7, 11), including knight moves.
    Chessknight,
}

impl WeightPreset {
    pub const ALL: [WeightPreset; 7] = [
        WeightPreset::Chessboard, WeightPreset::CityBlock, WeightPreset::QuasiEuclidean,
        WeightPreset::Borgefors, WeightPreset::Weights23, WeightPreset::Weights57,
        WeightPreset::Chessknight,
    ];

    pub fn weights(self) -> &'static [f32] {
        match self {
            WeightPreset::Chessboard => &[1.0, 1.0],
            WeightPreset::CityBlock => &[1.0, 2.0],
            WeightPreset::QuasiEuclidean => &[1.0, std::f32::consts::SQRT_2],
            WeightPreset::Borgefors => &[3.0, 4.0],
            WeightPreset::Weights23 => &[2.0, 3.0],
            WeightPreset::Weights57 => &[5.0, 7.0],
            WeightPreset::Chessknight => &[5.0, 7.0, 11.0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeightPreset::Chessboard => "chessboard",
            WeightPreset::CityBlock => "city-block",
            WeightPreset::QuasiEuclidean => "quasi-euclidean",
            WeightPreset::Borgefors => "borgefors",
            WeightPreset::Weights23 => "weights-23",
            WeightPreset::Weights57 => "weights-57",
            WeightPreset::Chessknight => "chessknight",
        }
    }
}

impl FromStr for WeightPreset {
    type Err = ChamferError;

    fn from_str(name: &str) -> Result<Self> {
        WeightPreset::ALL.iter().copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ChamferError::invalid_configuration(
                format!("unknown weight preset `{}`", name)
            ))
    }
}


impl ChamferWeights {

    /// Validates an explicit weight array: at least two entries,
    /// each one strictly positive and finite.
    pub fn new(weights: Vec<f32>) -> Result<Self> {
        if weights.len() < 2 {
            return Err(ChamferError::invalid_configuration(format!(
                "expected at least 2 chamfer weights, got {}", weights.len()
            )));
        }

        if let Some((index, weight)) = weights.iter().enumerate()
            .find(|(_, weight)| !(weight.is_finite() && **weight > 0.0))
        {
            return Err(ChamferError::invalid_configuration(format!(
                "chamfer weight {} must be positive and finite, got {}", index, weight
            )));
        }

        Ok(ChamferWeights { weights })
    }

    pub fn from_preset(preset: WeightPreset) -> Self {
        ChamferWeights { weights: preset.weights().to_vec() }
    }

    /// Weight of the specified offset class.
    /// Panics if the class is not covered by this weight set.
    #[inline]
    pub fn get(&self, class: usize) -> f32 {
        self.weights[class]
    }

    #[inline]
    pub fn orthogonal(&self) -> f32 {
        self.weights[ORTHOGONAL]
    }

    #[inline]
    pub fn diagonal(&self) -> f32 {
        self.weights[DIAGONAL]
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }
}

impl From<WeightPreset> for ChamferWeights {
    fn from(preset: WeightPreset) -> Self {
        ChamferWeights::from_preset(preset)
    }
}

impl FromStr for ChamferWeights {
    type Err = ChamferError;

    fn from_str(name: &str) -> Result<Self> {
        name.parse::<WeightPreset>().map(ChamferWeights::from_preset)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_weight_arrays(){
        assert!(ChamferWeights::new(vec![]).is_err());
        assert!(ChamferWeights::new(vec![1.0]).is_err());
        assert!(ChamferWeights::new(vec![1.0, 1.5]).is_ok());
    }

    #[test]
    fn rejects_non_positive_or_non_finite_weights(){
        assert!(ChamferWeights::new(vec![0.0, 1.0]).is_err());
        assert!(ChamferWeights::new(vec![1.0, -1.0]).is_err());
        assert!(ChamferWeights::new(vec![1.0, std::f32::INFINITY]).is_err());
        assert!(ChamferWeights::new(vec![std::f32::NAN, 1.0]).is_err());
    }

    #[test]
    fn accepts_diagonal_cheaper_than_orthogonal(){
        let weights = ChamferWeights::new(vec![2.0, 1.0]).unwrap();
        assert_eq!(weights.orthogonal(), 2.0);
        assert_eq!(weights.diagonal(), 1.0);
    }

    #[test]
    fn presets_are_valid_weight_sets(){
        for preset in WeightPreset::ALL.iter().copied() {
            let weights = ChamferWeights::new(preset.weights().to_vec()).unwrap();
            assert_eq!(weights, ChamferWeights::from_preset(preset));
            assert!(weights.diagonal() >= weights.orthogonal(), "{}", preset.name());
        }
    }

    #[test]
    fn parses_preset_names(){
        assert_eq!("borgefors".parse::<WeightPreset>().unwrap(), WeightPreset::Borgefors);
        assert_eq!("Quasi-Euclidean".parse::<WeightPreset>().unwrap(), WeightPreset::QuasiEuclidean);

        let weights: ChamferWeights = "chessknight".parse().unwrap();
        assert_eq!(weights.as_slice(), &[5.0, 7.0, 11.0]);

        assert!("euclidean".parse::<WeightPreset>().is_err());
    }
}
