use std::collections::BTreeSet;

use super::taxonomy::{FactorInfo, FactorSet};
use super::{Lens, LensVersion, Policy};
use crate::engine::{
    Archetype, ArchetypeCatalog, ArchetypeId, ConsensusThresholds, EngineError, FactorId,
    LensBounds, LikertScale, LoadingTable, PolicyId, PolicyImpactScores, PolicyModifier, Question,
    QuestionFactorLoading, QuestionId, WeightProfile,
};

struct ArchetypeDraft {
    id: String,
    name: String,
    philosopher: String,
    description: String,
    weights: Vec<(String, f64)>,
}

struct PolicyDraft {
    id: String,
    name: String,
    summary: String,
    impacts: Vec<(String, f64)>,
    modifiers: Vec<PolicyModifier>,
}

/// Collects catalog data for a lens and validates it in `build`.
pub struct LensBuilder {
    version: LensVersion,
    name: String,
    summary: String,
    scale: LikertScale,
    factors: Vec<FactorInfo>,
    questions: Vec<Question>,
    archetypes: Vec<ArchetypeDraft>,
    policies: Vec<PolicyDraft>,
    baseline: Option<Vec<(String, f64)>>,
    match_threshold: f64,
    consensus: ConsensusThresholds,
}

fn owned(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
    pairs
        .iter()
        .map(|(factor, value)| (factor.to_string(), *value))
        .collect()
}

impl LensBuilder {
    pub fn new(version: LensVersion, name: &str) -> Self {
        Self {
            version,
            name: name.to_string(),
            summary: String::new(),
            scale: LikertScale::default(),
            factors: Vec::new(),
            questions: Vec::new(),
            archetypes: Vec::new(),
            policies: Vec::new(),
            baseline: None,
            match_threshold: 0.6,
            consensus: ConsensusThresholds::standard(),
        }
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn scale(mut self, scale: LikertScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn factor(mut self, info: FactorInfo) -> Self {
        self.factors.push(info);
        self
    }

    pub fn question(mut self, id: &str, prompt: &str, loadings: &[(&str, f64)]) -> Self {
        self.questions.push(Question {
            id: QuestionId::from(id),
            prompt: prompt.to_string(),
            loadings: loadings
                .iter()
                .map(|(factor, weight)| QuestionFactorLoading {
                    factor: FactorId::from(*factor),
                    weight: *weight,
                })
                .collect(),
        });
        self
    }

    pub fn archetype(
        mut self,
        id: &str,
        name: &str,
        philosopher: &str,
        description: &str,
        weights: &[(&str, f64)],
    ) -> Self {
        self.archetypes.push(ArchetypeDraft {
            id: id.to_string(),
            name: name.to_string(),
            philosopher: philosopher.to_string(),
            description: description.to_string(),
            weights: owned(weights),
        });
        self
    }

    pub fn policy(
        mut self,
        id: &str,
        name: &str,
        summary: &str,
        impacts: &[(&str, f64)],
        modifiers: Vec<PolicyModifier>,
    ) -> Self {
        self.policies.push(PolicyDraft {
            id: id.to_string(),
            name: name.to_string(),
            summary: summary.to_string(),
            impacts: owned(impacts),
            modifiers,
        });
        self
    }

    /// Defaults to the all-neutral profile when never set.
    pub fn population_baseline(mut self, weights: &[(&str, f64)]) -> Self {
        self.baseline = Some(owned(weights));
        self
    }

    pub fn match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn consensus(mut self, thresholds: ConsensusThresholds) -> Self {
        self.consensus = thresholds;
        self
    }

    pub fn build(self) -> Result<Lens, EngineError> {
        let version = self.version;
        let factors = FactorSet::new(self.factors)?;

        if !(-1.0..=1.0).contains(&self.match_threshold) {
            return Err(EngineError::catalog(format!(
                "lens {version} match threshold {} lies outside [-1, 1]",
                self.match_threshold
            )));
        }

        let mut archetypes = Vec::with_capacity(self.archetypes.len());
        for draft in self.archetypes {
            archetypes.push(Archetype {
                id: ArchetypeId::new(draft.id),
                name: draft.name,
                philosopher: draft.philosopher,
                description: draft.description,
                profile: WeightProfile::new(version, &factors, draft.weights)?,
            });
        }
        let archetypes = ArchetypeCatalog::new(version, archetypes)?;

        let mut policies = Vec::with_capacity(self.policies.len());
        let mut policy_ids = BTreeSet::new();
        for draft in self.policies {
            if !policy_ids.insert(draft.id.clone()) {
                return Err(EngineError::catalog(format!(
                    "lens {version} defines policy `{}` twice",
                    draft.id
                )));
            }
            policies.push(build_policy(version, &factors, draft)?);
        }

        let population_baseline = match self.baseline {
            Some(weights) => WeightProfile::new(version, &factors, weights)?,
            None => WeightProfile::neutral(version, &factors),
        };

        let loadings = LoadingTable::new(version, self.scale, factors, self.questions)?;
        let bounds = LensBounds::from_loadings(&loadings);
        bounds.ensure_non_degenerate()?;

        Ok(Lens {
            version,
            name: self.name,
            summary: self.summary,
            loadings,
            bounds,
            archetypes,
            match_threshold: self.match_threshold,
            policies,
            population_baseline,
            consensus: self.consensus,
        })
    }
}

fn build_policy(
    version: LensVersion,
    factors: &FactorSet,
    draft: PolicyDraft,
) -> Result<Policy, EngineError> {
    let impacts = PolicyImpactScores::new(version, factors, draft.impacts)?;
    if impacts.reach() == 0.0 {
        return Err(EngineError::DegenerateImpact);
    }

    let mut modifier_ids = BTreeSet::new();
    for modifier in &draft.modifiers {
        if !modifier_ids.insert(&modifier.id) {
            return Err(EngineError::catalog(format!(
                "policy `{}` defines modifier `{}` twice",
                draft.id, modifier.id
            )));
        }
        if let Some(unknown) = modifier
            .condition
            .referenced_factors()
            .into_iter()
            .find(|factor| !factors.contains(factor))
        {
            return Err(EngineError::catalog(format!(
                "modifier `{}` on policy `{}` references unknown factor `{unknown}`",
                modifier.id, draft.id
            )));
        }
        if !modifier.adjustment.amount().is_finite() {
            return Err(EngineError::catalog(format!(
                "modifier `{}` on policy `{}` has a non-finite adjustment",
                modifier.id, draft.id
            )));
        }
        if modifier
            .condition
            .thresholds()
            .iter()
            .any(|threshold| !threshold.is_finite())
        {
            return Err(EngineError::catalog(format!(
                "modifier `{}` on policy `{}` has a non-finite condition threshold",
                modifier.id, draft.id
            )));
        }
    }

    Ok(Policy {
        id: PolicyId::new(draft.id),
        name: draft.name,
        summary: draft.summary,
        impacts,
        modifiers: draft.modifiers,
    })
}
