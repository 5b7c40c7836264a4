use super::views::{
    ArchetypeRow, DriverRow, FactorRow, Leaning, MatchSummary, PolicyRow, ProfileReport,
};
use crate::engine::{
    ArchetypeSelection, Baseline, DivergenceDriver, EngineError, LensEngine, PolicyAssessment,
    PolicyId, ResponseSet, ValuesProfile, DISPLAY_RANGE,
};
use crate::lenses::{Lens, Policy};

/// Weights within this distance of zero read as balanced.
pub const LEANING_DEADBAND: f64 = 0.15;

/// Drivers listed per policy unless the caller asks otherwise.
pub const DEFAULT_TOP_DRIVERS: usize = 3;

impl ProfileReport {
    /// Run the full pipeline and shape it for output.
    ///
    /// With `policy` set only that policy is scored; otherwise the whole catalog is.
    pub fn generate(
        engine: &LensEngine<'_>,
        responses: &ResponseSet,
        baseline: &Baseline,
        policy: Option<&PolicyId>,
        top_drivers: usize,
    ) -> Result<Self, EngineError> {
        let lens = engine.lens();
        let profile = engine.profile(responses)?;
        let assessments = match policy {
            Some(id) => vec![engine.score_policy_against(&profile, id, baseline)?],
            None => engine.score_all(&profile, baseline)?,
        };

        let mut policies = Vec::with_capacity(assessments.len());
        for assessment in &assessments {
            let policy = lens.policy(&assessment.policy)?;
            policies.push(policy_row(lens, policy, assessment, top_drivers));
        }

        Ok(Self {
            lens: lens.version(),
            lens_name: lens.name().to_string(),
            answered: responses.len(),
            questions: lens.questions().len(),
            baseline: baseline.clone(),
            archetype: match_summary(lens, &profile, engine.match_threshold()),
            factors: factor_rows(lens, &profile),
            archetypes: archetype_rows(lens, &profile),
            policies,
        })
    }
}

pub fn leaning(weight: f64) -> Leaning {
    if weight > LEANING_DEADBAND {
        Leaning::High
    } else if weight < -LEANING_DEADBAND {
        Leaning::Low
    } else {
        Leaning::Balanced
    }
}

fn factor_rows(lens: &Lens, profile: &ValuesProfile) -> Vec<FactorRow> {
    lens.factors()
        .iter()
        .map(|info| {
            let score = profile.scores.get(&info.id).unwrap_or(0.0);
            let weight = profile.weights.get(&info.id).unwrap_or(0.0);
            let leaning = leaning(weight);
            let leaning_label = match leaning {
                Leaning::Low => info.low_anchor.clone(),
                Leaning::High => info.high_anchor.clone(),
                Leaning::Balanced => "Balanced".to_string(),
            };
            FactorRow {
                factor: info.id.clone(),
                label: info.label.clone(),
                score,
                weight,
                leaning,
                leaning_label,
            }
        })
        .collect()
}

fn match_summary(lens: &Lens, profile: &ValuesProfile, threshold: f64) -> MatchSummary {
    let label = match &profile.archetype.selection {
        ArchetypeSelection::Archetype(id) => lens
            .archetypes()
            .get(id)
            .map(|archetype| archetype.name.clone())
            .unwrap_or_else(|| id.to_string()),
        ArchetypeSelection::Custom => "Custom".to_string(),
    };

    MatchSummary {
        selection: profile.archetype.selection.clone(),
        label,
        similarity: profile.archetype.similarity,
        threshold,
    }
}

fn archetype_rows(lens: &Lens, profile: &ValuesProfile) -> Vec<ArchetypeRow> {
    profile
        .archetype
        .candidates
        .iter()
        .filter_map(|candidate| {
            lens.archetypes().get(&candidate.id).map(|archetype| ArchetypeRow {
                id: candidate.id.clone(),
                name: archetype.name.clone(),
                philosopher: archetype.philosopher.clone(),
                similarity: candidate.similarity,
                selected: profile.archetype.selection
                    == ArchetypeSelection::Archetype(candidate.id.clone()),
            })
        })
        .collect()
}

fn policy_row(
    lens: &Lens,
    policy: &Policy,
    assessment: &PolicyAssessment,
    top_drivers: usize,
) -> PolicyRow {
    let reach = policy.impacts.reach();
    let drivers = assessment
        .divergence
        .top(top_drivers)
        .iter()
        .map(|driver| driver_row(lens, driver, reach))
        .collect();
    let impact = assessment.impact();

    PolicyRow {
        policy: policy.id.clone(),
        name: policy.name.clone(),
        display: assessment.display,
        baseline_display: assessment.baseline_display,
        raw: impact.raw,
        adjusted: impact.value,
        fired: impact.fired.clone(),
        consensus: assessment.consensus.state,
        consensus_label: assessment.consensus.state.label(),
        gap: assessment.consensus.gap,
        direction: assessment.consensus.direction,
        attribution: assessment.divergence.attribution,
        attribution_label: assessment.divergence.attribution.label(),
        residual: assessment.divergence.residual,
        drivers,
    }
}

fn driver_row(lens: &Lens, driver: &DivergenceDriver, reach: f64) -> DriverRow {
    let label = lens
        .factors()
        .get(&driver.factor)
        .map(|info| info.label.clone())
        .unwrap_or_else(|| driver.factor.to_string());
    // Lens build rejects zero-reach policies.
    let points = if reach > 0.0 {
        DISPLAY_RANGE * driver.contribution / reach
    } else {
        0.0
    };

    DriverRow {
        factor: driver.factor.clone(),
        label,
        contribution: driver.contribution,
        points,
        individual_weight: driver.individual_weight,
        baseline_weight: driver.baseline_weight,
    }
}
