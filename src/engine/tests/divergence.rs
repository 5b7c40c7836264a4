use super::common::*;
use crate::engine::{
    explain_divergence, project_impact, rank_divergence_drivers, Attribution, EngineError,
    ModifierId, PolicyId,
};
use crate::lenses::LensVersion;

#[test]
fn contributions_sum_to_the_gap_without_modifiers() {
    let registry = registry();
    let lens = registry.lens(LensVersion::V4);
    let policy = lens
        .policy(&PolicyId::from("free-trade-pact"))
        .expect("policy exists");
    let profile = weights(
        lens,
        &[
            ("markets", 0.9),
            ("equality", -0.5),
            ("liberty", 0.6),
            ("authority", -0.3),
            ("sustainability", -0.2),
            ("globalism", 0.7),
        ],
    );

    let breakdown = explain_divergence(
        &profile,
        lens.population_baseline(),
        &policy.impacts,
        &policy.modifiers,
    )
    .expect("comparable profiles");

    assert_eq!(breakdown.attribution, Attribution::Exact);
    let attributed: f64 = breakdown
        .drivers
        .iter()
        .map(|driver| driver.contribution)
        .sum();
    assert_close(attributed, breakdown.gap);
    assert_close(breakdown.residual, 0.0);
    assert_eq!(breakdown.drivers.len(), lens.factors().len());
}

#[test]
fn a_single_differing_factor_carries_the_whole_gap() {
    let registry = registry();
    let lens = registry.lens(LensVersion::V4);
    let policy = lens
        .policy(&PolicyId::from("free-trade-pact"))
        .expect("policy exists");
    let baseline = lens.population_baseline();
    let profile = baseline.with_weight(&factor("markets"), 1.0);

    let breakdown = explain_divergence(&profile, baseline, &policy.impacts, &policy.modifiers)
        .expect("comparable profiles");

    let top = &breakdown.drivers[0];
    assert_eq!(top.factor, factor("markets"));
    assert_close(top.contribution, 0.8 * 0.9);
    assert_eq!(top.individual_weight, 1.0);
    assert_eq!(top.baseline_weight, 0.2);
    assert!(breakdown.drivers[1..]
        .iter()
        .all(|driver| driver.contribution == 0.0));
    assert_close(breakdown.gap, 0.8 * 0.9);
}

#[test]
fn ties_in_contribution_are_ordered_by_factor_id() {
    let registry = registry();
    let lens = registry.lens(LensVersion::V4);
    let policy = lens
        .policy(&PolicyId::from("free-trade-pact"))
        .expect("policy exists");
    let baseline = lens.population_baseline();

    let breakdown = explain_divergence(baseline, baseline, &policy.impacts, &policy.modifiers)
        .expect("comparable profiles");

    assert_eq!(breakdown.gap, 0.0);
    let order: Vec<&str> = breakdown
        .drivers
        .iter()
        .map(|driver| driver.factor.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "authority",
            "equality",
            "globalism",
            "liberty",
            "markets",
            "sustainability"
        ]
    );
}

#[test]
fn fired_modifiers_make_attribution_approximate() {
    let registry = registry();
    let lens = registry.lens(LensVersion::V4);
    let policy = lens
        .policy(&PolicyId::from("surveillance-expansion"))
        .expect("policy exists");
    let baseline = lens.population_baseline();
    let profile = baseline.with_weight(&factor("authority"), 0.9);

    let breakdown = explain_divergence(&profile, baseline, &policy.impacts, &policy.modifiers)
        .expect("comparable profiles");

    assert_eq!(breakdown.attribution, Attribution::Approximate);
    assert_eq!(
        breakdown.individual.fired,
        vec![ModifierId::from("security-first")]
    );
    assert!(breakdown.baseline.fired.is_empty());

    let individual_raw = project_impact(&profile, &policy.impacts).expect("same lens");
    let baseline_raw = project_impact(baseline, &policy.impacts).expect("same lens");
    assert_close(breakdown.individual.value, individual_raw * 1.25);
    assert_close(breakdown.drivers[0].contribution, individual_raw * 1.25 - baseline_raw);
    assert_eq!(breakdown.drivers[0].factor, factor("authority"));
}

#[test]
fn modifiers_that_never_fire_keep_attribution_exact() {
    let registry = registry();
    let lens = registry.lens(LensVersion::V1);
    let policy = lens
        .policy(&PolicyId::from("rent-control"))
        .expect("policy exists");
    let profile = weights(
        lens,
        &[
            ("economic-freedom", -0.5),
            ("social-equality", 0.7),
            ("personal-liberty", 0.1),
            ("tradition", -0.4),
        ],
    );

    let breakdown = explain_divergence(
        &profile,
        lens.population_baseline(),
        &policy.impacts,
        &policy.modifiers,
    )
    .expect("comparable profiles");

    assert_eq!(breakdown.attribution, Attribution::Exact);
    assert!(breakdown.individual.fired.is_empty());
    assert_close(breakdown.residual, 0.0);
    assert_eq!(breakdown.drivers[0].factor, factor("economic-freedom"));
}

#[test]
fn ranking_matches_the_breakdown_and_top_is_bounded() {
    let registry = registry();
    let lens = registry.lens(LensVersion::V1);
    let policy = lens
        .policy(&PolicyId::from("universal-basic-income"))
        .expect("policy exists");
    let profile = weights(
        lens,
        &[
            ("economic-freedom", 0.8),
            ("social-equality", -0.6),
            ("personal-liberty", 0.9),
            ("tradition", 0.2),
        ],
    );
    let baseline = lens.population_baseline();

    let breakdown = explain_divergence(&profile, baseline, &policy.impacts, &policy.modifiers)
        .expect("comparable profiles");
    let ranked = rank_divergence_drivers(&profile, baseline, &policy.impacts, &policy.modifiers)
        .expect("comparable profiles");

    assert_eq!(ranked, breakdown.drivers);
    assert_eq!(breakdown.top(2).len(), 2);
    assert_eq!(breakdown.top(99).len(), 4);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].contribution.abs() >= pair[1].contribution.abs()));
}

#[test]
fn baselines_from_another_lens_are_rejected() {
    let registry = registry();
    let v1 = registry.lens(LensVersion::V1);
    let v2 = registry.lens(LensVersion::V2);
    let policy = &v1.policies()[0];

    let err = explain_divergence(
        v1.population_baseline(),
        v2.population_baseline(),
        &policy.impacts,
        &policy.modifiers,
    )
    .expect_err("lens mismatch");

    assert_eq!(
        err,
        EngineError::LensMismatch {
            expected: LensVersion::V1,
            found: LensVersion::V2,
        }
    );
}
