use tracing::info;

use super::{v1, v2, v3, v4, Lens, LensVersion};
use crate::engine::EngineError;

/// Every shipped lens, built and validated once.
///
/// Hold the registry for the life of the process and borrow lenses from it;
/// nothing here is mutated after `load`.
#[derive(Debug, Clone)]
pub struct LensRegistry {
    lenses: Vec<Lens>,
}

impl LensRegistry {
    pub fn load() -> Result<Self, EngineError> {
        let lenses = vec![v1::lens()?, v2::lens()?, v3::lens()?, v4::lens()?];

        for lens in &lenses {
            info!(
                lens = %lens.version(),
                factors = lens.factors().len(),
                questions = lens.questions().len(),
                archetypes = lens.archetypes().len(),
                policies = lens.policies().len(),
                "lens catalog loaded"
            );
        }

        Ok(Self { lenses })
    }

    pub fn lens(&self, version: LensVersion) -> &Lens {
        &self.lenses[version.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lens> {
        self.lenses.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::engine::{classify_consensus, ConsensusState, ConsensusThresholds};

    #[test]
    fn every_version_resolves_to_its_own_lens() {
        let registry = LensRegistry::load().expect("catalogs are valid");
        for version in LensVersion::ordered() {
            assert_eq!(registry.lens(version).version(), version);
        }
    }

    #[test]
    fn political_economy_lens_tunes_its_own_consensus_ladder() {
        let registry = LensRegistry::load().expect("catalogs are valid");
        let consensus = registry.lens(LensVersion::V2).consensus();

        assert_ne!(consensus, &ConsensusThresholds::standard());
        assert_eq!(consensus.polarization(), Some(35.0));
        assert_eq!(
            classify_consensus(30.0, 0.0, consensus),
            ConsensusState::Neutral
        );
        assert_eq!(
            classify_consensus(58.0, 0.0, consensus),
            ConsensusState::StronglyDivergent
        );
    }

    #[test]
    fn factor_ids_do_not_collide_across_lenses() {
        let registry = LensRegistry::load().expect("catalogs are valid");
        let mut seen = BTreeSet::new();
        for lens in registry.iter() {
            for factor in lens.factors().ids() {
                assert!(
                    seen.insert(factor.clone()),
                    "factor {factor} appears in more than one lens"
                );
            }
        }
    }

    #[test]
    fn every_factor_is_covered_by_at_least_two_questions() {
        let registry = LensRegistry::load().expect("catalogs are valid");
        for lens in registry.iter() {
            for factor in lens.factors().ids() {
                let count = lens
                    .questions()
                    .iter()
                    .filter(|question| {
                        question
                            .loadings
                            .iter()
                            .any(|loading| &loading.factor == factor)
                    })
                    .count();
                assert!(count >= 2, "{} factor {factor} has {count} question(s)", lens.version());
            }
        }
    }
}
