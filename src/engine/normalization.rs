use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{
    ensure_same_keys, FactorId, FactorScores, LoadingTable, WeightProfile, MAX_WEIGHT, MIN_WEIGHT,
};
use super::error::{ensure_same_lens, EngineError};
use crate::lenses::LensVersion;

/// Theoretical extremes a factor's raw score can reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorBound {
    pub min: f64,
    pub max: f64,
}

impl FactorBound {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    fn is_degenerate(&self) -> bool {
        !(self.range().is_finite() && self.range() > 0.0)
    }
}

/// Per-factor bounds for one lens, derived from its loading table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensBounds {
    lens: LensVersion,
    bounds: BTreeMap<FactorId, FactorBound>,
}

impl LensBounds {
    /// Each answered question can move a factor by at most
    /// `half_range * |loading|` in either direction; a factor's bound is the sum.
    pub fn from_loadings(table: &LoadingTable) -> Self {
        let half_range = table.scale().half_range();
        let mut bounds: BTreeMap<FactorId, FactorBound> = table
            .factors()
            .ids()
            .map(|factor| (factor.clone(), FactorBound { min: 0.0, max: 0.0 }))
            .collect();

        for question in table.questions() {
            for loading in &question.loadings {
                if let Some(bound) = bounds.get_mut(&loading.factor) {
                    let reach = half_range * loading.weight.abs();
                    bound.min -= reach;
                    bound.max += reach;
                }
            }
        }

        Self {
            lens: table.lens(),
            bounds,
        }
    }

    /// Explicit bounds, for lenses whose extremes are authored by hand.
    pub fn new(lens: LensVersion, bounds: BTreeMap<FactorId, FactorBound>) -> Self {
        Self { lens, bounds }
    }

    pub fn lens(&self) -> LensVersion {
        self.lens
    }

    pub fn get(&self, factor: &FactorId) -> Option<FactorBound> {
        self.bounds.get(factor).copied()
    }

    /// Fails on the first factor (in id order) whose range is zero.
    pub fn ensure_non_degenerate(&self) -> Result<(), EngineError> {
        match self.bounds.iter().find(|(_, bound)| bound.is_degenerate()) {
            Some((factor, _)) => Err(EngineError::DegenerateFactor {
                factor: factor.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Scale each factor from its theoretical bound onto `[MIN_WEIGHT, MAX_WEIGHT]`.
pub fn normalize(scores: &FactorScores, bounds: &LensBounds) -> Result<WeightProfile, EngineError> {
    ensure_same_lens(bounds.lens, scores.lens())?;

    let raw: BTreeMap<FactorId, f64> = scores
        .iter()
        .map(|(factor, score)| (factor.clone(), score))
        .collect();
    ensure_same_keys(&bounds.bounds, &raw)?;

    let mut weights = BTreeMap::new();
    for (factor, bound) in &bounds.bounds {
        if bound.is_degenerate() {
            return Err(EngineError::DegenerateFactor {
                factor: factor.clone(),
            });
        }
        let score = raw[factor];
        let scaled = (2.0 * score - (bound.max + bound.min)) / bound.range();
        weights.insert(factor.clone(), scaled.clamp(MIN_WEIGHT, MAX_WEIGHT));
    }

    Ok(WeightProfile::from_normalized(scores.lens(), weights))
}
