use crate::engine::{
    Adjustment, FactorId, ModifierCondition, PolicyModifier, QuestionId, ResponseSet,
    WeightProfile,
};
use crate::lenses::{FactorInfo, Lens, LensBuilder, LensRegistry, LensVersion};

pub(super) const TOLERANCE: f64 = 1e-12;

/// Two factors `a` and `b`, one question each, five-point scale.
pub(super) fn two_factor_builder() -> LensBuilder {
    Lens::builder(LensVersion::V2, "Two factor")
        .factor(FactorInfo::new("a", "A", "First axis", "low a", "high a"))
        .factor(FactorInfo::new("b", "B", "Second axis", "low b", "high b"))
        .question("q1", "Loads a", &[("a", 1.0)])
        .question("q2", "Loads b", &[("b", 1.0)])
}

pub(super) fn two_factor_lens() -> Lens {
    two_factor_builder()
        .archetype("contrarian", "Contrarian", "Nobody", "", &[("a", -1.0), ("b", 0.0)])
        .archetype("market", "Market", "Somebody", "", &[("a", 1.0), ("b", 0.0)])
        .archetype("mixed", "Mixed", "Everybody", "", &[("a", 0.5), ("b", 0.5)])
        .policy("p", "Plain", "", &[("a", 1.0), ("b", 1.0)], Vec::new())
        .policy(
            "q",
            "Modified",
            "",
            &[("a", 1.0), ("b", 0.5)],
            vec![PolicyModifier::new(
                "boost",
                "",
                ModifierCondition::weight_above("a", 0.5),
                Adjustment::Scale(2.0),
            )],
        )
        .build()
        .expect("two factor lens builds")
}

pub(super) fn registry() -> LensRegistry {
    LensRegistry::load().expect("shipped catalogs are valid")
}

pub(super) fn responses(pairs: &[(&str, i8)]) -> ResponseSet {
    pairs
        .iter()
        .map(|(question, value)| (QuestionId::from(*question), *value))
        .collect()
}

/// Every question answered with `answer(index)`.
pub(super) fn answer_all(lens: &Lens, answer: impl Fn(usize) -> i8) -> ResponseSet {
    lens.questions()
        .iter()
        .enumerate()
        .map(|(index, question)| (question.id.clone(), answer(index)))
        .collect()
}

pub(super) fn neutral_responses(lens: &Lens) -> ResponseSet {
    let midpoint = lens.scale().midpoint() as i8;
    answer_all(lens, |_| midpoint)
}

pub(super) fn weights(lens: &Lens, pairs: &[(&str, f64)]) -> WeightProfile {
    WeightProfile::new(lens.version(), lens.factors(), pairs.iter().copied())
        .expect("valid weight profile")
}

pub(super) fn factor(id: &str) -> FactorId {
    FactorId::from(id)
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}
