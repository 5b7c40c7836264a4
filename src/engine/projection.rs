use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{ensure_same_keys, FactorId, WeightProfile};
use super::error::{ensure_same_lens, EngineError};
use crate::lenses::{FactorSet, LensVersion};

/// Half-width of the display range; display scores lie in `[-100, 100]`.
pub const DISPLAY_RANGE: f64 = 100.0;

/// Precomputed signed per-factor impact of one policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyImpactScores {
    lens: LensVersion,
    impacts: BTreeMap<FactorId, f64>,
}

impl PolicyImpactScores {
    pub fn new<I, F>(lens: LensVersion, factors: &FactorSet, impacts: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (F, f64)>,
        F: Into<FactorId>,
    {
        let impacts: BTreeMap<FactorId, f64> = impacts
            .into_iter()
            .map(|(factor, impact)| (factor.into(), impact))
            .collect();

        factors.ensure_exact(impacts.keys())?;
        if let Some((factor, _)) = impacts.iter().find(|(_, impact)| !impact.is_finite()) {
            return Err(EngineError::catalog(format!(
                "impact on factor `{factor}` is not finite"
            )));
        }

        Ok(Self { lens, impacts })
    }

    pub fn lens(&self) -> LensVersion {
        self.lens
    }

    pub fn get(&self, factor: &FactorId) -> Option<f64> {
        self.impacts.get(factor).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactorId, f64)> {
        self.impacts.iter().map(|(factor, impact)| (factor, *impact))
    }

    /// Largest raw score any profile can reach: `Σ|impact|`, attained at weights of ±1.
    pub fn reach(&self) -> f64 {
        self.impacts.values().map(|impact| impact.abs()).sum()
    }

    /// Map a raw (or adjusted) score onto `[-DISPLAY_RANGE, DISPLAY_RANGE]`.
    ///
    /// Modifiers can push a score past the theoretical reach; those are clamped.
    pub fn to_display(&self, score: f64) -> Result<f64, EngineError> {
        let reach = self.reach();
        if reach == 0.0 {
            return Err(EngineError::DegenerateImpact);
        }
        Ok((DISPLAY_RANGE * score / reach).clamp(-DISPLAY_RANGE, DISPLAY_RANGE))
    }
}

/// Dot product of a weight profile with a policy's factor impacts.
pub fn project_impact(
    profile: &WeightProfile,
    impacts: &PolicyImpactScores,
) -> Result<f64, EngineError> {
    ensure_same_lens(impacts.lens, profile.lens())?;
    ensure_same_keys(&impacts.impacts, profile.weights())?;

    Ok(profile
        .weights()
        .iter()
        .map(|(factor, weight)| weight * impacts.impacts[factor])
        .sum())
}
