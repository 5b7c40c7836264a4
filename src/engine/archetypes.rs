use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::domain::{ArchetypeId, WeightProfile};
use super::error::{ensure_same_lens, EngineError};
use crate::lenses::LensVersion;

/// Predefined philosophical stance used as a matching reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Archetype {
    pub id: ArchetypeId,
    pub name: String,
    pub philosopher: String,
    pub description: String,
    pub profile: WeightProfile,
}

/// Static archetype catalog of one lens, kept in ascending id order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeCatalog {
    lens: LensVersion,
    archetypes: Vec<Archetype>,
}

impl ArchetypeCatalog {
    pub fn new(lens: LensVersion, mut archetypes: Vec<Archetype>) -> Result<Self, EngineError> {
        let mut seen = BTreeSet::new();
        for archetype in &archetypes {
            ensure_same_lens(lens, archetype.profile.lens())?;
            if !seen.insert(archetype.id.clone()) {
                return Err(EngineError::catalog(format!(
                    "archetype `{}` defined twice",
                    archetype.id
                )));
            }
        }
        if let Some(first) = archetypes.first() {
            for archetype in &archetypes[1..] {
                first.profile.ensure_comparable(&archetype.profile)?;
            }
        }

        archetypes.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(Self { lens, archetypes })
    }

    pub fn lens(&self) -> LensVersion {
        self.lens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.iter()
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn get(&self, id: &ArchetypeId) -> Option<&Archetype> {
        self.archetypes.iter().find(|archetype| &archetype.id == id)
    }
}

/// Outcome of matching: a catalog archetype, or no archetype close enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ArchetypeSelection {
    Archetype(ArchetypeId),
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeCandidate {
    pub id: ArchetypeId,
    pub similarity: f64,
}

/// Ranked similarity of a profile against every eligible archetype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeMatch {
    pub selection: ArchetypeSelection,
    /// Similarity of the top candidate, or 0.0 when no archetype was eligible.
    pub similarity: f64,
    pub candidates: Vec<ArchetypeCandidate>,
}

impl ArchetypeMatch {
    pub fn is_custom(&self) -> bool {
        self.selection == ArchetypeSelection::Custom
    }

    pub fn best(&self) -> Option<&ArchetypeCandidate> {
        self.candidates.first()
    }

    /// Candidates after the top one ("you're also close to ...").
    pub fn runners_up(&self) -> &[ArchetypeCandidate] {
        self.candidates.get(1..).unwrap_or(&[])
    }
}

/// Cosine similarity over factor-aligned weights, clamped to `[-1, 1]`.
///
/// Returns 0.0 when either profile has zero magnitude. Both profiles must cover
/// the same factors; callers check this with `ensure_comparable`.
pub fn cosine_similarity(left: &WeightProfile, right: &WeightProfile) -> f64 {
    let left_sq = left.magnitude_squared();
    let right_sq = right.magnitude_squared();
    if left_sq == 0.0 || right_sq == 0.0 {
        return 0.0;
    }

    let dot: f64 = left
        .weights()
        .iter()
        .map(|(factor, weight)| weight * right.get(factor).unwrap_or(0.0))
        .sum();

    (dot / (left_sq * right_sq).sqrt()).clamp(-1.0, 1.0)
}

/// Rank the catalog by similarity to `profile` (descending, ties by ascending id).
///
/// Archetypes with a zero-magnitude reference profile are skipped. When the best
/// similarity falls below `threshold` the selection is `Custom`.
pub fn match_archetype(
    profile: &WeightProfile,
    catalog: &ArchetypeCatalog,
    threshold: f64,
) -> Result<ArchetypeMatch, EngineError> {
    ensure_same_lens(catalog.lens, profile.lens())?;

    let mut candidates = Vec::with_capacity(catalog.len());
    for archetype in &catalog.archetypes {
        profile.ensure_comparable(&archetype.profile)?;
        if archetype.profile.magnitude_squared() == 0.0 {
            continue;
        }
        candidates.push(ArchetypeCandidate {
            id: archetype.id.clone(),
            similarity: cosine_similarity(profile, &archetype.profile),
        });
    }

    candidates.sort_by(|left, right| {
        right
            .similarity
            .total_cmp(&left.similarity)
            .then_with(|| left.id.cmp(&right.id))
    });

    let (selection, similarity) = match candidates.first() {
        Some(best) if best.similarity >= threshold => {
            (ArchetypeSelection::Archetype(best.id.clone()), best.similarity)
        }
        Some(best) => (ArchetypeSelection::Custom, best.similarity),
        None => (ArchetypeSelection::Custom, 0.0),
    };

    debug!(
        lens = %profile.lens(),
        candidates = candidates.len(),
        similarity,
        custom = selection == ArchetypeSelection::Custom,
        "matched archetype"
    );

    Ok(ArchetypeMatch {
        selection,
        similarity,
        candidates,
    })
}
