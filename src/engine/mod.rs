//! Values scoring pipeline.
//!
//! Each stage is a pure function over its arguments and can be called on its own;
//! `LensEngine` chains them for one borrowed lens.

mod aggregation;
mod archetypes;
mod consensus;
mod divergence;
mod domain;
mod error;
mod modifiers;
mod normalization;
mod projection;

#[cfg(test)]
mod tests;

pub use aggregation::aggregate_responses;
pub use archetypes::{
    cosine_similarity, match_archetype, Archetype, ArchetypeCandidate, ArchetypeCatalog,
    ArchetypeMatch, ArchetypeSelection,
};
pub use consensus::{
    classify_consensus, read_consensus, ConsensusBand, ConsensusReading, ConsensusState,
    ConsensusThresholds, GapDirection,
};
pub use divergence::{
    explain_divergence, rank_divergence_drivers, Attribution, DivergenceBreakdown,
    DivergenceDriver,
};
pub use domain::{
    ArchetypeId, FactorId, FactorScores, LikertResponse, LikertScale, LoadingTable, ModifierId,
    PolicyId, Question, QuestionFactorLoading, QuestionId, ResponseSet, WeightProfile, MAX_WEIGHT,
    MIN_WEIGHT,
};
pub use error::{EngineError, ErrorKind};
pub use modifiers::{apply_modifiers, Adjustment, ImpactScore, ModifierCondition, PolicyModifier};
pub use normalization::{normalize, FactorBound, LensBounds};
pub use projection::{project_impact, PolicyImpactScores, DISPLAY_RANGE};

use serde::Serialize;
use tracing::debug;

use crate::lenses::{Lens, LensVersion};
use error::ensure_same_lens;

/// Reference point a personal score is compared against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Baseline {
    /// The lens's precomputed population profile.
    Population,
    Archetype(ArchetypeId),
}

/// Output of the response-to-archetype half of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuesProfile {
    pub lens: LensVersion,
    pub scores: FactorScores,
    pub weights: WeightProfile,
    pub archetype: ArchetypeMatch,
}

/// One policy scored for one profile against one baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyAssessment {
    pub policy: PolicyId,
    pub baseline: Baseline,
    /// Adjusted personal score on the `[-100, 100]` display scale.
    pub display: f64,
    pub baseline_display: f64,
    pub consensus: ConsensusReading,
    pub divergence: DivergenceBreakdown,
}

impl PolicyAssessment {
    pub fn impact(&self) -> &ImpactScore {
        &self.divergence.individual
    }
}

/// Stateless pipeline facade over a borrowed lens.
#[derive(Debug, Clone, Copy)]
pub struct LensEngine<'a> {
    lens: &'a Lens,
    match_threshold: f64,
}

impl<'a> LensEngine<'a> {
    pub fn new(lens: &'a Lens) -> Self {
        Self {
            lens,
            match_threshold: lens.match_threshold(),
        }
    }

    /// Override the lens's archetype threshold.
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn lens(&self) -> &'a Lens {
        self.lens
    }

    pub fn match_threshold(&self) -> f64 {
        self.match_threshold
    }

    pub fn profile(&self, responses: &ResponseSet) -> Result<ValuesProfile, EngineError> {
        let scores = aggregate_responses(responses, self.lens.loadings())?;
        let weights = normalize(&scores, self.lens.bounds())?;
        let archetype = match_archetype(&weights, self.lens.archetypes(), self.match_threshold)?;

        Ok(ValuesProfile {
            lens: self.lens.version(),
            scores,
            weights,
            archetype,
        })
    }

    pub fn score_policy(
        &self,
        profile: &ValuesProfile,
        policy: &PolicyId,
    ) -> Result<PolicyAssessment, EngineError> {
        self.score_policy_against(profile, policy, &Baseline::Population)
    }

    pub fn score_policy_against(
        &self,
        profile: &ValuesProfile,
        policy: &PolicyId,
        baseline: &Baseline,
    ) -> Result<PolicyAssessment, EngineError> {
        ensure_same_lens(self.lens.version(), profile.lens)?;
        let policy = self.lens.policy(policy)?;
        let baseline_profile = self.lens.baseline_profile(baseline)?;

        let divergence = explain_divergence(
            &profile.weights,
            baseline_profile,
            &policy.impacts,
            &policy.modifiers,
        )?;
        let display_score = policy.impacts.to_display(divergence.individual.value)?;
        let baseline_display = policy.impacts.to_display(divergence.baseline.value)?;
        let consensus = read_consensus(display_score, baseline_display, self.lens.consensus());

        debug!(
            lens = %self.lens.version(),
            policy = %policy.id,
            display = display_score,
            baseline_display,
            state = consensus.state.label(),
            fired = divergence.individual.fired.len(),
            "scored policy"
        );

        Ok(PolicyAssessment {
            policy: policy.id.clone(),
            baseline: baseline.clone(),
            display: display_score,
            baseline_display,
            consensus,
            divergence,
        })
    }

    /// Every policy in catalog order against the same baseline.
    pub fn score_all(
        &self,
        profile: &ValuesProfile,
        baseline: &Baseline,
    ) -> Result<Vec<PolicyAssessment>, EngineError> {
        self.lens
            .policies()
            .iter()
            .map(|policy| self.score_policy_against(profile, &policy.id, baseline))
            .collect()
    }
}
