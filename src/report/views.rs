use serde::Serialize;

use crate::engine::{
    ArchetypeId, ArchetypeSelection, Attribution, Baseline, ConsensusState, FactorId, GapDirection,
    ModifierId, PolicyId,
};
use crate::lenses::LensVersion;

/// Which end of a factor a weight leans toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    Low,
    Balanced,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorRow {
    pub factor: FactorId,
    pub label: String,
    pub score: f64,
    pub weight: f64,
    pub leaning: Leaning,
    /// Anchor label of the side leaned toward, or "Balanced".
    pub leaning_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchetypeRow {
    pub id: ArchetypeId,
    pub name: String,
    pub philosopher: String,
    pub similarity: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub selection: ArchetypeSelection,
    /// Archetype name, or "Custom" when nothing cleared the threshold.
    pub label: String,
    pub similarity: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverRow {
    pub factor: FactorId,
    pub label: String,
    pub contribution: f64,
    /// Contribution expressed on the display scale.
    pub points: f64,
    pub individual_weight: f64,
    pub baseline_weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyRow {
    pub policy: PolicyId,
    pub name: String,
    pub display: f64,
    pub baseline_display: f64,
    pub raw: f64,
    pub adjusted: f64,
    pub fired: Vec<ModifierId>,
    pub consensus: ConsensusState,
    pub consensus_label: &'static str,
    pub gap: f64,
    pub direction: GapDirection,
    pub attribution: Attribution,
    pub attribution_label: &'static str,
    pub residual: f64,
    pub drivers: Vec<DriverRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub lens: LensVersion,
    pub lens_name: String,
    pub answered: usize,
    pub questions: usize,
    pub baseline: Baseline,
    pub archetype: MatchSummary,
    pub factors: Vec<FactorRow>,
    pub archetypes: Vec<ArchetypeRow>,
    pub policies: Vec<PolicyRow>,
}
