use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ensure_same_lens, EngineError};
use crate::lenses::{FactorSet, LensVersion};

/// Lower bound of every normalized weight.
pub const MIN_WEIGHT: f64 = -1.0;
/// Upper bound of every normalized weight.
pub const MAX_WEIGHT: f64 = 1.0;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of one scoring dimension within a lens.
    FactorId
);
string_id!(
    /// Identifier of a questionnaire item.
    QuestionId
);
string_id!(
    /// Identifier of an archetype; ascending order breaks similarity ties.
    ArchetypeId
);
string_id!(
    /// Identifier of a policy in a lens catalog.
    PolicyId
);
string_id!(
    /// Identifier of a policy modifier rule.
    ModifierId
);

/// A single Likert answer.
pub type LikertResponse = i8;

/// Answers keyed by question id, as supplied by the questionnaire UI.
pub type ResponseSet = BTreeMap<QuestionId, LikertResponse>;

/// Inclusive Likert scale declared by a lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLikertScale")]
pub struct LikertScale {
    min: i8,
    max: i8,
}

#[derive(Deserialize)]
struct RawLikertScale {
    min: i8,
    max: i8,
}

impl TryFrom<RawLikertScale> for LikertScale {
    type Error = EngineError;

    fn try_from(raw: RawLikertScale) -> Result<Self, Self::Error> {
        LikertScale::new(raw.min, raw.max)
    }
}

impl LikertScale {
    pub fn new(min: i8, max: i8) -> Result<Self, EngineError> {
        if min >= max {
            return Err(EngineError::catalog(format!(
                "likert scale {min}..={max} is empty"
            )));
        }
        Ok(Self { min, max })
    }

    /// Symmetric scale `-half..=half`, e.g. `symmetric(2)` for a five-point scale.
    pub fn symmetric(half: i8) -> Result<Self, EngineError> {
        if half <= 0 {
            return Err(EngineError::catalog(format!(
                "symmetric likert scale needs a positive half-width, got {half}"
            )));
        }
        Self::new(-half, half)
    }

    pub fn min(&self) -> i8 {
        self.min
    }

    pub fn max(&self) -> i8 {
        self.max
    }

    pub fn contains(&self, value: LikertResponse) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn midpoint(&self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }

    /// Distance from the midpoint to either end of the scale.
    pub fn half_range(&self) -> f64 {
        (f64::from(self.max) - f64::from(self.min)) / 2.0
    }

    /// Answer expressed relative to the midpoint, so a neutral answer is zero.
    pub fn centered(&self, value: LikertResponse) -> f64 {
        f64::from(value) - self.midpoint()
    }
}

/// Five-point `-2..=2` scale.
impl Default for LikertScale {
    fn default() -> Self {
        Self { min: -2, max: 2 }
    }
}

/// Signed contribution of one question to one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFactorLoading {
    pub factor: FactorId,
    pub weight: f64,
}

/// Questionnaire item with its factor loadings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub loadings: Vec<QuestionFactorLoading>,
}

/// Per-lens loading table: scale, factors, and the questions loading on them.
#[derive(Debug, Clone)]
pub struct LoadingTable {
    lens: LensVersion,
    scale: LikertScale,
    factors: FactorSet,
    questions: Vec<Question>,
    index: BTreeMap<QuestionId, usize>,
}

impl LoadingTable {
    pub fn new(
        lens: LensVersion,
        scale: LikertScale,
        factors: FactorSet,
        questions: Vec<Question>,
    ) -> Result<Self, EngineError> {
        let mut index = BTreeMap::new();
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id.clone(), position).is_some() {
                return Err(EngineError::catalog(format!(
                    "lens {lens} defines question `{}` twice",
                    question.id
                )));
            }
            if question.loadings.is_empty() {
                return Err(EngineError::catalog(format!(
                    "question `{}` loads on no factor",
                    question.id
                )));
            }
            for loading in &question.loadings {
                if !factors.contains(&loading.factor) {
                    return Err(EngineError::catalog(format!(
                        "question `{}` loads on unknown factor `{}`",
                        question.id, loading.factor
                    )));
                }
                if !loading.weight.is_finite() {
                    return Err(EngineError::catalog(format!(
                        "question `{}` has a non-finite loading on `{}`",
                        question.id, loading.factor
                    )));
                }
            }
        }

        Ok(Self {
            lens,
            scale,
            factors,
            questions,
            index,
        })
    }

    pub fn lens(&self) -> LensVersion {
        self.lens
    }

    pub fn scale(&self) -> LikertScale {
        self.scale
    }

    pub fn factors(&self) -> &FactorSet {
        &self.factors
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.index.get(id).map(|position| &self.questions[*position])
    }
}

/// Raw per-factor aggregate, total over its lens's factor set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScores {
    lens: LensVersion,
    scores: BTreeMap<FactorId, f64>,
}

impl FactorScores {
    pub(crate) fn from_totals(lens: LensVersion, scores: BTreeMap<FactorId, f64>) -> Self {
        Self { lens, scores }
    }

    pub fn lens(&self) -> LensVersion {
        self.lens
    }

    pub fn get(&self, factor: &FactorId) -> Option<f64> {
        self.scores.get(factor).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactorId, f64)> {
        self.scores.iter().map(|(factor, score)| (factor, *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Normalized per-factor weights in `[MIN_WEIGHT, MAX_WEIGHT]`.
///
/// Profiles are total over their lens's factor set and are only comparable with
/// profiles of the same lens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightProfile {
    lens: LensVersion,
    weights: BTreeMap<FactorId, f64>,
}

impl WeightProfile {
    /// Build a profile from explicit weights, checking totality and bounds.
    pub fn new<I, F>(lens: LensVersion, factors: &FactorSet, weights: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (F, f64)>,
        F: Into<FactorId>,
    {
        let weights: BTreeMap<FactorId, f64> = weights
            .into_iter()
            .map(|(factor, weight)| (factor.into(), weight))
            .collect();

        factors.ensure_exact(weights.keys())?;

        for (factor, weight) in &weights {
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(weight) {
                return Err(EngineError::WeightOutOfRange {
                    factor: factor.clone(),
                    value: *weight,
                });
            }
        }

        Ok(Self { lens, weights })
    }

    /// All-zero profile over the given factors.
    pub fn neutral(lens: LensVersion, factors: &FactorSet) -> Self {
        Self {
            lens,
            weights: factors.ids().map(|id| (id.clone(), 0.0)).collect(),
        }
    }

    pub(crate) fn from_normalized(lens: LensVersion, weights: BTreeMap<FactorId, f64>) -> Self {
        Self { lens, weights }
    }

    pub fn lens(&self) -> LensVersion {
        self.lens
    }

    pub fn get(&self, factor: &FactorId) -> Option<f64> {
        self.weights.get(factor).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactorId, f64)> {
        self.weights.iter().map(|(factor, weight)| (factor, *weight))
    }

    pub fn factors(&self) -> impl Iterator<Item = &FactorId> {
        self.weights.keys()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Copy of this profile with a single factor replaced.
    pub fn with_weight(&self, factor: &FactorId, weight: f64) -> Self {
        let mut weights = self.weights.clone();
        if let Some(slot) = weights.get_mut(factor) {
            *slot = weight;
        }
        Self {
            lens: self.lens,
            weights,
        }
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.weights.values().map(|weight| weight * weight).sum()
    }

    /// Fails unless `other` has the same lens and exactly the same factors.
    pub fn ensure_comparable(&self, other: &WeightProfile) -> Result<(), EngineError> {
        ensure_same_lens(self.lens, other.lens)?;
        ensure_same_keys(&self.weights, &other.weights)
    }

    pub(crate) fn weights(&self) -> &BTreeMap<FactorId, f64> {
        &self.weights
    }
}

pub(crate) fn ensure_same_keys<V, W>(
    expected: &BTreeMap<FactorId, V>,
    found: &BTreeMap<FactorId, W>,
) -> Result<(), EngineError> {
    let missing: Vec<FactorId> = expected
        .keys()
        .filter(|factor| !found.contains_key(*factor))
        .cloned()
        .collect();
    let unexpected: Vec<FactorId> = found
        .keys()
        .filter(|factor| !expected.contains_key(*factor))
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(EngineError::FactorSetMismatch {
            missing,
            unexpected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_answers_are_relative_to_midpoint() {
        let symmetric = LikertScale::symmetric(2).expect("valid scale");
        assert_eq!(symmetric, LikertScale::default());
        assert_eq!(symmetric.centered(0), 0.0);
        assert_eq!(symmetric.centered(-2), -2.0);

        let one_to_five = LikertScale::new(1, 5).expect("valid scale");
        assert_eq!(one_to_five.midpoint(), 3.0);
        assert_eq!(one_to_five.centered(3), 0.0);
        assert_eq!(one_to_five.centered(5), 2.0);
        assert_eq!(one_to_five.half_range(), 2.0);
    }

    #[test]
    fn empty_scale_is_rejected() {
        let err = LikertScale::new(2, 2).expect_err("empty scale");
        assert!(matches!(err, EngineError::InvalidCatalog(_)));
    }

    #[test]
    fn symmetric_scale_needs_a_positive_half_width() {
        assert!(LikertScale::symmetric(0).is_err());
        assert!(LikertScale::symmetric(-3).is_err());
        let seven_point = LikertScale::symmetric(3).expect("valid scale");
        assert_eq!((seven_point.min(), seven_point.max()), (-3, 3));
    }

    #[test]
    fn deserialized_scales_are_validated() {
        let scale: LikertScale =
            serde_json::from_str(r#"{"min": 1, "max": 5}"#).expect("valid scale");
        assert_eq!(scale.midpoint(), 3.0);

        let err = serde_json::from_str::<LikertScale>(r#"{"min": 2, "max": -2}"#)
            .expect_err("inverted scale");
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn key_mismatch_lists_both_sides() {
        let mut left = BTreeMap::new();
        left.insert(FactorId::from("a"), 1.0);
        left.insert(FactorId::from("b"), 1.0);
        let mut right = BTreeMap::new();
        right.insert(FactorId::from("a"), 1.0);
        right.insert(FactorId::from("c"), 1.0);

        match ensure_same_keys(&left, &right) {
            Err(EngineError::FactorSetMismatch {
                missing,
                unexpected,
            }) => {
                assert_eq!(missing, vec![FactorId::from("b")]);
                assert_eq!(unexpected, vec![FactorId::from("c")]);
            }
            other => panic!("expected factor set mismatch, got {other:?}"),
        }
    }
}
