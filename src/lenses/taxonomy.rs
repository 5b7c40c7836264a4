use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, FactorId};

/// Display metadata for a factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorInfo {
    pub id: FactorId,
    pub label: String,
    pub description: String,
    pub low_anchor: String,
    pub high_anchor: String,
}

impl FactorInfo {
    pub fn new(
        id: &str,
        label: &str,
        description: &str,
        low_anchor: &str,
        high_anchor: &str,
    ) -> Self {
        Self {
            id: FactorId::from(id),
            label: label.to_string(),
            description: description.to_string(),
            low_anchor: low_anchor.to_string(),
            high_anchor: high_anchor.to_string(),
        }
    }
}

/// Ordered, duplicate-free set of factors defined by one lens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorSet {
    factors: Vec<FactorInfo>,
}

impl FactorSet {
    pub fn new(factors: Vec<FactorInfo>) -> Result<Self, EngineError> {
        if factors.is_empty() {
            return Err(EngineError::catalog("factor set is empty"));
        }

        let mut seen = BTreeSet::new();
        for info in &factors {
            if !seen.insert(&info.id) {
                return Err(EngineError::catalog(format!(
                    "factor `{}` defined twice",
                    info.id
                )));
            }
        }

        Ok(Self { factors })
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorInfo> {
        self.factors.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &FactorId> {
        self.factors.iter().map(|info| &info.id)
    }

    pub fn contains(&self, id: &FactorId) -> bool {
        self.factors.iter().any(|info| &info.id == id)
    }

    pub fn get(&self, id: &FactorId) -> Option<&FactorInfo> {
        self.factors.iter().find(|info| &info.id == id)
    }

    /// Fails unless `keys` names every factor exactly once and nothing else.
    pub fn ensure_exact<'a, I>(&self, keys: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = &'a FactorId>,
    {
        let found: BTreeSet<&FactorId> = keys.into_iter().collect();
        let expected: BTreeSet<&FactorId> = self.ids().collect();

        let missing: Vec<FactorId> = expected.difference(&found).map(|id| (*id).clone()).collect();
        let unexpected: Vec<FactorId> =
            found.difference(&expected).map(|id| (*id).clone()).collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(EngineError::FactorSetMismatch {
                missing,
                unexpected,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(id: &str) -> FactorInfo {
        FactorInfo::new(id, id, "", "low", "high")
    }

    #[test]
    fn duplicate_factor_ids_are_rejected() {
        let err = FactorSet::new(vec![factor("a"), factor("a")]).expect_err("duplicate");
        assert!(err.to_string().contains("`a` defined twice"));
    }

    #[test]
    fn ensure_exact_reports_missing_and_extra_keys() {
        let set = FactorSet::new(vec![factor("a"), factor("b")]).expect("valid set");
        let keys = [FactorId::from("a"), FactorId::from("z")];

        match set.ensure_exact(keys.iter()) {
            Err(EngineError::FactorSetMismatch {
                missing,
                unexpected,
            }) => {
                assert_eq!(missing, vec![FactorId::from("b")]);
                assert_eq!(unexpected, vec![FactorId::from("z")]);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }
}
