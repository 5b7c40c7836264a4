//! Lens descriptors: one complete scoring model per version.
//!
//! A `Lens` bundles the factor taxonomy, questionnaire loadings, derived bounds,
//! archetype catalog, policy catalog, population baseline and consensus thresholds.
//! Lenses are validated once by `LensBuilder` and never mutated afterwards; the
//! engine receives the lens explicitly on every call.

mod builder;
mod registry;
mod taxonomy;
mod v1;
mod v2;
mod v3;
mod v4;

pub use builder::LensBuilder;
pub use registry::LensRegistry;
pub use taxonomy::{FactorInfo, FactorSet};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{
    Archetype, ArchetypeCatalog, ArchetypeId, Baseline, ConsensusThresholds, EngineError,
    LensBounds, LikertScale, LoadingTable, PolicyId, PolicyImpactScores, PolicyModifier, Question,
    WeightProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensVersion {
    V1,
    V2,
    V3,
    V4,
}

impl LensVersion {
    pub const fn ordered() -> [Self; 4] {
        [Self::V1, Self::V2, Self::V3, Self::V4]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
            Self::V4 => "v4",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::V1 => 0,
            Self::V2 => 1,
            Self::V3 => 2,
            Self::V4 => 3,
        }
    }
}

impl fmt::Display for LensVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lens `{0}` (expected v1, v2, v3 or v4)")]
pub struct ParseLensVersionError(pub String);

impl FromStr for LensVersion {
    type Err = ParseLensVersionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let bare = normalized.strip_prefix("lens-").unwrap_or(&normalized);
        match bare {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            "v4" | "4" => Ok(Self::V4),
            _ => Err(ParseLensVersionError(value.to_string())),
        }
    }
}

/// Policy with its precomputed impacts and ordered modifier rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    pub id: PolicyId,
    pub name: String,
    pub summary: String,
    pub impacts: PolicyImpactScores,
    pub modifiers: Vec<PolicyModifier>,
}

#[derive(Debug, Clone)]
pub struct Lens {
    pub(crate) version: LensVersion,
    pub(crate) name: String,
    pub(crate) summary: String,
    pub(crate) loadings: LoadingTable,
    pub(crate) bounds: LensBounds,
    pub(crate) archetypes: ArchetypeCatalog,
    pub(crate) match_threshold: f64,
    pub(crate) policies: Vec<Policy>,
    pub(crate) population_baseline: WeightProfile,
    pub(crate) consensus: ConsensusThresholds,
}

impl Lens {
    pub fn builder(version: LensVersion, name: &str) -> LensBuilder {
        LensBuilder::new(version, name)
    }

    pub fn version(&self) -> LensVersion {
        self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn scale(&self) -> LikertScale {
        self.loadings.scale()
    }

    pub fn factors(&self) -> &FactorSet {
        self.loadings.factors()
    }

    pub fn questions(&self) -> &[Question] {
        self.loadings.questions()
    }

    pub fn loadings(&self) -> &LoadingTable {
        &self.loadings
    }

    pub fn bounds(&self) -> &LensBounds {
        &self.bounds
    }

    pub fn archetypes(&self) -> &ArchetypeCatalog {
        &self.archetypes
    }

    pub fn match_threshold(&self) -> f64 {
        self.match_threshold
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn population_baseline(&self) -> &WeightProfile {
        &self.population_baseline
    }

    pub fn consensus(&self) -> &ConsensusThresholds {
        &self.consensus
    }

    pub fn policy(&self, id: &PolicyId) -> Result<&Policy, EngineError> {
        self.policies
            .iter()
            .find(|policy| &policy.id == id)
            .ok_or_else(|| EngineError::UnknownPolicy(id.clone()))
    }

    pub fn archetype(&self, id: &ArchetypeId) -> Result<&Archetype, EngineError> {
        self.archetypes
            .get(id)
            .ok_or_else(|| EngineError::UnknownArchetype(id.clone()))
    }

    pub fn baseline_profile(&self, baseline: &Baseline) -> Result<&WeightProfile, EngineError> {
        match baseline {
            Baseline::Population => Ok(&self.population_baseline),
            Baseline::Archetype(id) => self.archetype(id).map(|archetype| &archetype.profile),
        }
    }
}
