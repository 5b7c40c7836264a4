use crate::engine::{
    classify_consensus, read_consensus, ConsensusBand, ConsensusState, ConsensusThresholds,
    ErrorKind, GapDirection,
};

fn standard() -> ConsensusThresholds {
    ConsensusThresholds::standard()
}

#[test]
fn small_gaps_are_aligned() {
    assert_eq!(
        classify_consensus(50.0, 45.0, &standard()),
        ConsensusState::StronglyAligned
    );
    assert_eq!(
        classify_consensus(50.0, 30.0, &standard()),
        ConsensusState::MildlyAligned
    );
    assert_eq!(
        classify_consensus(-20.0, 10.0, &standard()),
        ConsensusState::Neutral
    );
}

#[test]
fn band_edges_are_inclusive() {
    assert_eq!(
        classify_consensus(20.0, 10.0, &standard()),
        ConsensusState::StronglyAligned
    );
    assert_eq!(
        classify_consensus(20.5, 10.0, &standard()),
        ConsensusState::MildlyAligned
    );
    assert_eq!(
        classify_consensus(75.0, 15.0, &standard()),
        ConsensusState::MildlyDivergent
    );
}

#[test]
fn gaps_past_every_band_are_strongly_divergent() {
    assert_eq!(
        classify_consensus(80.0, 0.0, &standard()),
        ConsensusState::StronglyDivergent
    );
    assert_eq!(
        classify_consensus(-100.0, 0.0, &standard()),
        ConsensusState::StronglyDivergent
    );
}

#[test]
fn strong_opposite_signs_are_polarized() {
    assert_eq!(
        classify_consensus(40.0, -35.0, &standard()),
        ConsensusState::Polarized
    );
    assert_eq!(
        classify_consensus(-30.0, 30.0, &standard()),
        ConsensusState::Polarized
    );
}

#[test]
fn weak_opposite_signs_fall_back_to_the_gap() {
    assert_eq!(
        classify_consensus(40.0, -20.0, &standard()),
        ConsensusState::MildlyDivergent
    );
    assert_eq!(
        classify_consensus(10.0, -10.0, &standard()),
        ConsensusState::MildlyAligned
    );
    assert_eq!(
        classify_consensus(0.0, -90.0, &standard()),
        ConsensusState::StronglyDivergent
    );
}

#[test]
fn without_polarization_only_the_gap_counts() {
    let thresholds = ConsensusThresholds::new(standard().bands().to_vec(), None)
        .expect("valid thresholds");

    assert_eq!(
        classify_consensus(40.0, -35.0, &thresholds),
        ConsensusState::StronglyDivergent
    );
}

#[test]
fn classification_is_symmetric() {
    let pairs = [(50.0, 45.0), (40.0, -35.0), (-12.5, 60.0), (0.0, 0.0)];
    for (left, right) in pairs {
        assert_eq!(
            classify_consensus(left, right, &standard()),
            classify_consensus(right, left, &standard())
        );
    }
}

#[test]
fn reading_reports_signed_gap_and_direction() {
    let below = read_consensus(10.0, 20.0, &standard());
    assert_eq!(below.gap, -10.0);
    assert_eq!(below.direction, GapDirection::Below);
    assert_eq!(below.state, ConsensusState::StronglyAligned);

    let above = read_consensus(90.0, 20.0, &standard());
    assert_eq!(above.direction, GapDirection::Above);
    assert_eq!(above.state, ConsensusState::StronglyDivergent);

    let level = read_consensus(5.0, 5.0, &standard());
    assert_eq!(level.gap, 0.0);
    assert_eq!(level.direction, GapDirection::Level);
}

#[test]
fn malformed_thresholds_are_rejected() {
    let band = |max_gap| ConsensusBand {
        max_gap,
        state: ConsensusState::Neutral,
    };

    let descending = ConsensusThresholds::new(vec![band(20.0), band(10.0)], None)
        .expect_err("bands must ascend");
    assert_eq!(descending.kind(), ErrorKind::Configuration);

    assert!(ConsensusThresholds::new(vec![band(10.0), band(10.0)], None).is_err());
    assert!(ConsensusThresholds::new(vec![band(-1.0)], None).is_err());
    assert!(ConsensusThresholds::new(vec![band(f64::NAN)], None).is_err());
    assert!(ConsensusThresholds::new(vec![band(10.0)], Some(0.0)).is_err());
    assert!(ConsensusThresholds::new(vec![band(10.0)], Some(f64::INFINITY)).is_err());
}

#[test]
fn empty_band_list_classifies_everything_as_strongly_divergent() {
    let thresholds = ConsensusThresholds::new(Vec::new(), None).expect("valid thresholds");

    assert_eq!(
        classify_consensus(1.0, 1.0, &thresholds),
        ConsensusState::StronglyDivergent
    );
}
