use serde::Serialize;

use super::domain::{ArchetypeId, FactorId, PolicyId, QuestionId};
use crate::lenses::LensVersion;

/// Broad classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller supplied a malformed response, id, or profile.
    InvalidInput,
    /// A factor or policy has no theoretical range; a data-authoring bug.
    DegenerateFactor,
    /// Data drawn from different lenses (or factor sets) was combined.
    LensMismatch,
    /// A lens catalog failed validation while being built.
    Configuration,
}

/// Errors raised synchronously by engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("question `{0}` is not defined by this lens")]
    UnknownQuestion(QuestionId),
    #[error("response {value} to question `{question}` lies outside the {min}..={max} scale")]
    ResponseOutOfRange {
        question: QuestionId,
        value: i8,
        min: i8,
        max: i8,
    },
    #[error("weight {value} for factor `{factor}` lies outside [-1, 1]")]
    WeightOutOfRange { factor: FactorId, value: f64 },
    #[error("policy `{0}` is not defined by this lens")]
    UnknownPolicy(PolicyId),
    #[error("archetype `{0}` is not defined by this lens")]
    UnknownArchetype(ArchetypeId),
    #[error("factor `{factor}` has a zero theoretical range")]
    DegenerateFactor { factor: FactorId },
    #[error("policy impacts are all zero, so no display range exists")]
    DegenerateImpact,
    #[error("expected data for lens {expected}, found lens {found}")]
    LensMismatch {
        expected: LensVersion,
        found: LensVersion,
    },
    #[error("factor set mismatch (missing {missing:?}, unexpected {unexpected:?})")]
    FactorSetMismatch {
        missing: Vec<FactorId>,
        unexpected: Vec<FactorId>,
    },
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UnknownQuestion(_)
            | EngineError::ResponseOutOfRange { .. }
            | EngineError::WeightOutOfRange { .. }
            | EngineError::UnknownPolicy(_)
            | EngineError::UnknownArchetype(_) => ErrorKind::InvalidInput,
            EngineError::DegenerateFactor { .. } | EngineError::DegenerateImpact => {
                ErrorKind::DegenerateFactor
            }
            EngineError::LensMismatch { .. } | EngineError::FactorSetMismatch { .. } => {
                ErrorKind::LensMismatch
            }
            EngineError::InvalidCatalog(_) => ErrorKind::Configuration,
        }
    }

    pub(crate) fn catalog(detail: impl Into<String>) -> Self {
        EngineError::InvalidCatalog(detail.into())
    }
}

pub(crate) fn ensure_same_lens(expected: LensVersion, found: LensVersion) -> Result<(), EngineError> {
    if expected == found {
        Ok(())
    } else {
        Err(EngineError::LensMismatch { expected, found })
    }
}
