use super::common::*;
use crate::engine::{
    cosine_similarity, match_archetype, ArchetypeId, ArchetypeSelection, EngineError,
};
use crate::lenses::LensVersion;

#[test]
fn every_archetype_matches_itself_exactly() {
    let registry = registry();
    for lens in registry.iter() {
        for archetype in lens.archetypes().iter() {
            if archetype.profile.magnitude_squared() == 0.0 {
                continue;
            }
            let matched = match_archetype(
                &archetype.profile,
                lens.archetypes(),
                lens.match_threshold(),
            )
            .expect("same lens");

            assert_eq!(
                matched.selection,
                ArchetypeSelection::Archetype(archetype.id.clone()),
                "{} {}",
                lens.version(),
                archetype.id
            );
            assert_close(matched.similarity, 1.0);
        }
    }
}

#[test]
fn candidates_are_ranked_by_similarity() {
    let lens = two_factor_lens();
    let profile = weights(&lens, &[("a", 0.9), ("b", 0.2)]);

    let matched = match_archetype(&profile, lens.archetypes(), 0.6).expect("same lens");

    let order: Vec<&str> = matched
        .candidates
        .iter()
        .map(|candidate| candidate.id.as_str())
        .collect();
    assert_eq!(order, vec!["market", "mixed", "contrarian"]);
    assert_eq!(
        matched.selection,
        ArchetypeSelection::Archetype(ArchetypeId::from("market"))
    );
    assert_eq!(matched.runners_up().len(), 2);
    assert!(matched.candidates[2].similarity < 0.0);
}

#[test]
fn opposite_profiles_have_similarity_minus_one() {
    let lens = two_factor_lens();
    let left = weights(&lens, &[("a", 1.0), ("b", 0.0)]);
    let right = weights(&lens, &[("a", -0.4), ("b", 0.0)]);

    assert_close(cosine_similarity(&left, &right), -1.0);
}

#[test]
fn zero_magnitude_archetypes_are_never_candidates() {
    let lens = two_factor_builder()
        .archetype("blank", "Blank", "", "", &[("a", 0.0), ("b", 0.0)])
        .archetype("market", "Market", "", "", &[("a", 1.0), ("b", 0.0)])
        .build()
        .expect("lens builds");
    let profile = weights(&lens, &[("a", 0.7), ("b", 0.1)]);

    let matched = match_archetype(&profile, lens.archetypes(), 0.6).expect("same lens");

    assert_eq!(matched.candidates.len(), 1);
    assert_eq!(matched.candidates[0].id, ArchetypeId::from("market"));
}

#[test]
fn catalog_of_only_blank_archetypes_is_custom_with_zero_similarity() {
    let lens = two_factor_builder()
        .archetype("blank", "Blank", "", "", &[("a", 0.0), ("b", 0.0)])
        .build()
        .expect("lens builds");
    let profile = weights(&lens, &[("a", 0.7), ("b", 0.1)]);

    let matched = match_archetype(&profile, lens.archetypes(), -1.0).expect("same lens");

    assert!(matched.is_custom());
    assert_eq!(matched.similarity, 0.0);
    assert!(matched.best().is_none());
}

#[test]
fn equal_similarity_ties_break_by_ascending_id() {
    let lens = two_factor_builder()
        .archetype("beta", "Beta", "", "", &[("a", 1.0), ("b", 0.0)])
        .archetype("alpha", "Alpha", "", "", &[("a", 0.5), ("b", 0.0)])
        .build()
        .expect("lens builds");
    let profile = weights(&lens, &[("a", 0.8), ("b", 0.0)]);

    let matched = match_archetype(&profile, lens.archetypes(), 0.6).expect("same lens");

    assert_eq!(
        matched.selection,
        ArchetypeSelection::Archetype(ArchetypeId::from("alpha"))
    );
    assert_eq!(matched.candidates[1].id, ArchetypeId::from("beta"));
}

#[test]
fn best_match_below_threshold_is_custom_but_keeps_its_similarity() {
    let lens = two_factor_lens();
    let profile = weights(&lens, &[("a", 0.0), ("b", 1.0)]);

    let matched = match_archetype(&profile, lens.archetypes(), 0.8).expect("same lens");

    assert!(matched.is_custom());
    assert_close(matched.similarity, 0.5_f64.sqrt());
    let best = matched.best().expect("candidates are still reported");
    assert_eq!(best.id, ArchetypeId::from("mixed"));
}

#[test]
fn threshold_is_inclusive() {
    let lens = two_factor_lens();
    let profile = weights(&lens, &[("a", 1.0), ("b", 0.0)]);

    let matched = match_archetype(&profile, lens.archetypes(), 1.0).expect("same lens");

    assert_eq!(
        matched.selection,
        ArchetypeSelection::Archetype(ArchetypeId::from("market"))
    );
}

#[test]
fn neutral_profile_is_custom() {
    let registry = registry();
    for lens in registry.iter() {
        let profile = crate::engine::WeightProfile::neutral(lens.version(), lens.factors());
        let matched = match_archetype(&profile, lens.archetypes(), lens.match_threshold())
            .expect("same lens");

        assert!(matched.is_custom(), "{}", lens.version());
        assert_eq!(matched.similarity, 0.0);
        assert!(matched
            .candidates
            .iter()
            .all(|candidate| candidate.similarity == 0.0));
    }
}

#[test]
fn profile_from_another_lens_is_rejected() {
    let registry = registry();
    let v1 = registry.lens(LensVersion::V1);
    let v3 = registry.lens(LensVersion::V3);

    let err = match_archetype(v1.population_baseline(), v3.archetypes(), 0.6)
        .expect_err("lens mismatch");

    assert_eq!(
        err,
        EngineError::LensMismatch {
            expected: LensVersion::V3,
            found: LensVersion::V1,
        }
    );
}
