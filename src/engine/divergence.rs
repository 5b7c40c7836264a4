use serde::Serialize;

use super::domain::{FactorId, WeightProfile};
use super::error::EngineError;
use super::modifiers::{apply_modifiers, ImpactScore, PolicyModifier};
use super::projection::{project_impact, PolicyImpactScores};

/// One factor's share of the gap between an individual and a baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceDriver {
    pub factor: FactorId,
    /// Score change when this factor alone is reset to the baseline weight.
    pub contribution: f64,
    pub individual_weight: f64,
    pub baseline_weight: f64,
}

/// Whether contributions sum exactly to the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribution {
    /// No modifier fired in any evaluation, so scoring was linear in the weights.
    Exact,
    /// Modifiers fired; one-factor-at-a-time contributions may leave a residual.
    Approximate,
}

impl Attribution {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Approximate => "approximate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceBreakdown {
    pub individual: ImpactScore,
    pub baseline: ImpactScore,
    /// `individual.value - baseline.value`.
    pub gap: f64,
    /// Sorted by |contribution| descending, ties by ascending factor id.
    pub drivers: Vec<DivergenceDriver>,
    /// `gap - Σ contribution`; zero up to rounding when attribution is exact.
    pub residual: f64,
    pub attribution: Attribution,
}

impl DivergenceBreakdown {
    pub fn top(&self, count: usize) -> &[DivergenceDriver] {
        &self.drivers[..count.min(self.drivers.len())]
    }
}

fn score(
    profile: &WeightProfile,
    impacts: &PolicyImpactScores,
    modifiers: &[PolicyModifier],
) -> Result<ImpactScore, EngineError> {
    let raw = project_impact(profile, impacts)?;
    Ok(apply_modifiers(raw, profile, modifiers))
}

/// Decompose the individual/baseline gap one factor at a time.
///
/// For each factor the profile is re-scored with only that factor reset to the
/// baseline weight; the drop in score is the factor's contribution. This is exact
/// only while scoring is linear in the weights, i.e. when no modifier fires.
pub fn explain_divergence(
    profile: &WeightProfile,
    baseline: &WeightProfile,
    impacts: &PolicyImpactScores,
    modifiers: &[PolicyModifier],
) -> Result<DivergenceBreakdown, EngineError> {
    profile.ensure_comparable(baseline)?;

    let individual = score(profile, impacts, modifiers)?;
    let baseline_score = score(baseline, impacts, modifiers)?;
    let mut nonlinear = !individual.fired.is_empty() || !baseline_score.fired.is_empty();

    let mut drivers = Vec::with_capacity(profile.len());
    for (factor, individual_weight) in profile.iter() {
        let baseline_weight = baseline.get(factor).unwrap_or(0.0);
        let counterfactual = score(
            &profile.with_weight(factor, baseline_weight),
            impacts,
            modifiers,
        )?;
        nonlinear |= !counterfactual.fired.is_empty();

        drivers.push(DivergenceDriver {
            factor: factor.clone(),
            contribution: individual.value - counterfactual.value,
            individual_weight,
            baseline_weight,
        });
    }

    drivers.sort_by(|left, right| {
        right
            .contribution
            .abs()
            .total_cmp(&left.contribution.abs())
            .then_with(|| left.factor.cmp(&right.factor))
    });

    let gap = individual.value - baseline_score.value;
    let attributed: f64 = drivers.iter().map(|driver| driver.contribution).sum();

    Ok(DivergenceBreakdown {
        individual,
        baseline: baseline_score,
        gap,
        drivers,
        residual: gap - attributed,
        attribution: if nonlinear {
            Attribution::Approximate
        } else {
            Attribution::Exact
        },
    })
}

/// Factors driving the gap, most influential first.
pub fn rank_divergence_drivers(
    profile: &WeightProfile,
    baseline: &WeightProfile,
    impacts: &PolicyImpactScores,
    modifiers: &[PolicyModifier],
) -> Result<Vec<DivergenceDriver>, EngineError> {
    explain_divergence(profile, baseline, impacts, modifiers).map(|breakdown| breakdown.drivers)
}
