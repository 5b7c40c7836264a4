use super::common::*;
use crate::engine::{
    ArchetypeId, ArchetypeSelection, Attribution, Baseline, ConsensusState, EngineError,
    GapDirection, LensEngine, ModifierId, PolicyId,
};
use crate::lenses::LensVersion;

#[test]
fn opposite_answers_cancel_on_an_even_policy() {
    let lens = two_factor_lens();
    let engine = LensEngine::new(&lens);

    let profile = engine
        .profile(&responses(&[("q1", 2), ("q2", -2)]))
        .expect("valid responses");
    assert_eq!(profile.scores.get(&factor("a")), Some(2.0));
    assert_eq!(profile.scores.get(&factor("b")), Some(-2.0));
    assert_eq!(profile.weights.get(&factor("a")), Some(1.0));
    assert_eq!(profile.weights.get(&factor("b")), Some(-1.0));

    let assessment = engine
        .score_policy(&profile, &PolicyId::from("p"))
        .expect("policy p exists");
    assert_eq!(assessment.impact().raw, 0.0);
    assert_eq!(assessment.display, 0.0);
    assert_eq!(assessment.baseline_display, 0.0);
    assert_eq!(assessment.consensus.state, ConsensusState::StronglyAligned);
    assert_eq!(assessment.consensus.direction, GapDirection::Level);
    assert_eq!(assessment.baseline, Baseline::Population);
}

#[test]
fn modifiers_flow_through_to_the_display_score() {
    let lens = two_factor_lens();
    let engine = LensEngine::new(&lens);
    let profile = engine
        .profile(&responses(&[("q1", 2), ("q2", 0)]))
        .expect("valid responses");

    let assessment = engine
        .score_policy(&profile, &PolicyId::from("q"))
        .expect("policy q exists");

    assert_eq!(assessment.impact().raw, 1.0);
    assert_eq!(assessment.impact().value, 2.0);
    assert_eq!(assessment.impact().fired, vec![ModifierId::from("boost")]);
    assert_eq!(assessment.display, 100.0);
    assert_eq!(assessment.consensus.state, ConsensusState::StronglyDivergent);
    assert_eq!(assessment.divergence.attribution, Attribution::Approximate);
}

#[test]
fn scoring_under_a_debug_subscriber_reports_the_display_score() {
    let lens = two_factor_lens();
    let engine = LensEngine::new(&lens);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    let assessment = tracing::subscriber::with_default(subscriber, || {
        let profile = engine
            .profile(&responses(&[("q1", 2), ("q2", 0)]))
            .expect("valid responses");
        engine
            .score_policy(&profile, &PolicyId::from("q"))
            .expect("policy q exists")
    });

    assert_eq!(assessment.display, 100.0);
    assert_eq!(assessment.baseline_display, 0.0);
}

#[test]
fn scoring_is_deterministic() {
    let registry = registry();
    let lens = registry.lens(LensVersion::V4);
    let engine = LensEngine::new(lens);
    let answers = answer_all(lens, |index| [2, -1, 0, 1, -2][index % 5]);

    let first = engine.profile(&answers).expect("valid responses");
    let second = engine.profile(&answers).expect("valid responses");
    assert_eq!(first, second);

    let first_scores = engine
        .score_all(&first, &Baseline::Population)
        .expect("catalog policies");
    let second_scores = engine
        .score_all(&second, &Baseline::Population)
        .expect("catalog policies");
    assert_eq!(first_scores, second_scores);
}

#[test]
fn score_all_covers_every_policy_in_catalog_order() {
    let registry = registry();
    for lens in registry.iter() {
        let engine = LensEngine::new(lens);
        let profile = engine
            .profile(&answer_all(lens, |index| if index % 2 == 0 { 1 } else { -1 }))
            .expect("valid responses");

        let assessments = engine
            .score_all(&profile, &Baseline::Population)
            .expect("catalog policies");

        let scored: Vec<&PolicyId> = assessments.iter().map(|item| &item.policy).collect();
        let catalog: Vec<&PolicyId> = lens.policies().iter().map(|policy| &policy.id).collect();
        assert_eq!(scored, catalog, "{}", lens.version());
        for assessment in &assessments {
            assert!((-100.0..=100.0).contains(&assessment.display));
            assert!((-100.0..=100.0).contains(&assessment.baseline_display));
        }
    }
}

#[test]
fn archetype_baselines_replace_the_population() {
    let lens = two_factor_lens();
    let engine = LensEngine::new(&lens);
    let profile = engine
        .profile(&responses(&[("q1", 2), ("q2", 2)]))
        .expect("valid responses");

    let assessment = engine
        .score_policy_against(
            &profile,
            &PolicyId::from("p"),
            &Baseline::Archetype(ArchetypeId::from("market")),
        )
        .expect("archetype exists");

    assert_eq!(assessment.display, 100.0);
    assert_eq!(assessment.baseline_display, 50.0);
    assert_eq!(assessment.consensus.state, ConsensusState::MildlyDivergent);
    assert_eq!(assessment.consensus.direction, GapDirection::Above);
    assert_eq!(assessment.divergence.drivers[0].factor, factor("b"));
}

#[test]
fn unknown_identifiers_are_invalid_input() {
    let lens = two_factor_lens();
    let engine = LensEngine::new(&lens);
    let profile = engine.profile(&responses(&[])).expect("empty responses");

    let err = engine
        .score_policy(&profile, &PolicyId::from("missing"))
        .expect_err("no such policy");
    assert_eq!(err, EngineError::UnknownPolicy(PolicyId::from("missing")));

    let err = engine
        .score_policy_against(
            &profile,
            &PolicyId::from("p"),
            &Baseline::Archetype(ArchetypeId::from("nobody")),
        )
        .expect_err("no such archetype");
    assert_eq!(
        err,
        EngineError::UnknownArchetype(ArchetypeId::from("nobody"))
    );
}

#[test]
fn profiles_cannot_cross_lenses() {
    let registry = registry();
    let v1 = registry.lens(LensVersion::V1);
    let v2 = registry.lens(LensVersion::V2);

    let profile = LensEngine::new(v1)
        .profile(&neutral_responses(v1))
        .expect("valid responses");
    let policy = v2.policies()[0].id.clone();

    let err = LensEngine::new(v2)
        .score_policy(&profile, &policy)
        .expect_err("v1 profile against v2 lens");
    assert_eq!(
        err,
        EngineError::LensMismatch {
            expected: LensVersion::V2,
            found: LensVersion::V1,
        }
    );
}

#[test]
fn responses_must_belong_to_the_engine_lens() {
    let registry = registry();
    let v1 = registry.lens(LensVersion::V1);
    let v4 = registry.lens(LensVersion::V4);

    let err = LensEngine::new(v4)
        .profile(&neutral_responses(v1))
        .expect_err("v1 questions are unknown to v4");
    assert!(matches!(err, EngineError::UnknownQuestion(_)));
}

#[test]
fn threshold_override_changes_only_the_selection() {
    let lens = two_factor_lens();
    let answers = responses(&[("q1", 2), ("q2", 0)]);

    let default = LensEngine::new(&lens).profile(&answers).expect("valid");
    let strict = LensEngine::new(&lens)
        .with_match_threshold(1.01)
        .profile(&answers)
        .expect("valid");

    assert_eq!(
        default.archetype.selection,
        ArchetypeSelection::Archetype(ArchetypeId::from("market"))
    );
    assert_eq!(strict.archetype.selection, ArchetypeSelection::Custom);
    assert_eq!(default.archetype.similarity, strict.archetype.similarity);
    assert_eq!(default.weights, strict.weights);
}
