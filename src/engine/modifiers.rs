use serde::{Deserialize, Serialize};

use super::domain::{FactorId, ModifierId, WeightProfile};

/// Condition evaluated against the weight profile and the running score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModifierCondition {
    Always,
    WeightAbove { factor: FactorId, threshold: f64 },
    WeightBelow { factor: FactorId, threshold: f64 },
    /// Every listed factor strictly exceeds the threshold.
    AllAbove { factors: Vec<FactorId>, threshold: f64 },
    /// Every listed factor is strictly below the threshold.
    AllBelow { factors: Vec<FactorId>, threshold: f64 },
    /// The score produced by the modifiers applied so far exceeds the threshold.
    RunningAbove { threshold: f64 },
    RunningBelow { threshold: f64 },
    All { conditions: Vec<ModifierCondition> },
    Any { conditions: Vec<ModifierCondition> },
    Not { condition: Box<ModifierCondition> },
}

impl ModifierCondition {
    pub fn weight_above(factor: &str, threshold: f64) -> Self {
        Self::WeightAbove {
            factor: FactorId::from(factor),
            threshold,
        }
    }

    pub fn weight_below(factor: &str, threshold: f64) -> Self {
        Self::WeightBelow {
            factor: FactorId::from(factor),
            threshold,
        }
    }

    pub fn all_above(factors: &[&str], threshold: f64) -> Self {
        Self::AllAbove {
            factors: factors.iter().map(|factor| FactorId::from(*factor)).collect(),
            threshold,
        }
    }

    pub fn all_below(factors: &[&str], threshold: f64) -> Self {
        Self::AllBelow {
            factors: factors.iter().map(|factor| FactorId::from(*factor)).collect(),
            threshold,
        }
    }

    pub fn running_above(threshold: f64) -> Self {
        Self::RunningAbove { threshold }
    }

    pub fn running_below(threshold: f64) -> Self {
        Self::RunningBelow { threshold }
    }

    pub fn all(conditions: Vec<ModifierCondition>) -> Self {
        Self::All { conditions }
    }

    /// Factors absent from the profile never satisfy a weight comparison.
    pub fn holds(&self, profile: &WeightProfile, running: f64) -> bool {
        let above = |factor: &FactorId, threshold: f64| {
            profile
                .get(factor)
                .map(|weight| weight > threshold)
                .unwrap_or(false)
        };
        let below = |factor: &FactorId, threshold: f64| {
            profile
                .get(factor)
                .map(|weight| weight < threshold)
                .unwrap_or(false)
        };

        match self {
            ModifierCondition::Always => true,
            ModifierCondition::WeightAbove { factor, threshold } => above(factor, *threshold),
            ModifierCondition::WeightBelow { factor, threshold } => below(factor, *threshold),
            ModifierCondition::AllAbove { factors, threshold } => {
                !factors.is_empty() && factors.iter().all(|factor| above(factor, *threshold))
            }
            ModifierCondition::AllBelow { factors, threshold } => {
                !factors.is_empty() && factors.iter().all(|factor| below(factor, *threshold))
            }
            ModifierCondition::RunningAbove { threshold } => running > *threshold,
            ModifierCondition::RunningBelow { threshold } => running < *threshold,
            ModifierCondition::All { conditions } => conditions
                .iter()
                .all(|condition| condition.holds(profile, running)),
            ModifierCondition::Any { conditions } => conditions
                .iter()
                .any(|condition| condition.holds(profile, running)),
            ModifierCondition::Not { condition } => !condition.holds(profile, running),
        }
    }

    /// Every factor the condition refers to, for catalog validation.
    pub fn referenced_factors(&self) -> Vec<&FactorId> {
        match self {
            ModifierCondition::Always
            | ModifierCondition::RunningAbove { .. }
            | ModifierCondition::RunningBelow { .. } => Vec::new(),
            ModifierCondition::WeightAbove { factor, .. }
            | ModifierCondition::WeightBelow { factor, .. } => vec![factor],
            ModifierCondition::AllAbove { factors, .. }
            | ModifierCondition::AllBelow { factors, .. } => factors.iter().collect(),
            ModifierCondition::All { conditions } | ModifierCondition::Any { conditions } => {
                conditions
                    .iter()
                    .flat_map(ModifierCondition::referenced_factors)
                    .collect()
            }
            ModifierCondition::Not { condition } => condition.referenced_factors(),
        }
    }

    /// Every threshold in the condition tree, for catalog validation.
    pub fn thresholds(&self) -> Vec<f64> {
        match self {
            ModifierCondition::Always => Vec::new(),
            ModifierCondition::WeightAbove { threshold, .. }
            | ModifierCondition::WeightBelow { threshold, .. }
            | ModifierCondition::AllAbove { threshold, .. }
            | ModifierCondition::AllBelow { threshold, .. }
            | ModifierCondition::RunningAbove { threshold }
            | ModifierCondition::RunningBelow { threshold } => vec![*threshold],
            ModifierCondition::All { conditions } | ModifierCondition::Any { conditions } => {
                conditions
                    .iter()
                    .flat_map(ModifierCondition::thresholds)
                    .collect()
            }
            ModifierCondition::Not { condition } => condition.thresholds(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    Add(f64),
    Scale(f64),
}

impl Adjustment {
    pub fn apply(self, score: f64) -> f64 {
        match self {
            Adjustment::Add(delta) => score + delta,
            Adjustment::Scale(factor) => score * factor,
        }
    }

    pub fn amount(self) -> f64 {
        match self {
            Adjustment::Add(delta) => delta,
            Adjustment::Scale(factor) => factor,
        }
    }
}

/// Contextual rule adjusting a projected score when its condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyModifier {
    pub id: ModifierId,
    pub description: String,
    pub condition: ModifierCondition,
    pub adjustment: Adjustment,
}

impl PolicyModifier {
    pub fn new(
        id: &str,
        description: &str,
        condition: ModifierCondition,
        adjustment: Adjustment,
    ) -> Self {
        Self {
            id: ModifierId::from(id),
            description: description.to_string(),
            condition,
            adjustment,
        }
    }
}

/// Final personal projection for one (profile, policy) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactScore {
    /// Projection before any modifier.
    pub raw: f64,
    /// Projection after every fired modifier.
    pub value: f64,
    /// Modifiers that fired, in firing order.
    pub fired: Vec<ModifierId>,
}

/// Apply modifiers serially: each condition sees the score left by the previous ones.
pub fn apply_modifiers(
    raw: f64,
    profile: &WeightProfile,
    modifiers: &[PolicyModifier],
) -> ImpactScore {
    let mut value = raw;
    let mut fired = Vec::new();

    for modifier in modifiers {
        if modifier.condition.holds(profile, value) {
            value = modifier.adjustment.apply(value);
            fired.push(modifier.id.clone());
        }
    }

    ImpactScore { raw, value, fired }
}
