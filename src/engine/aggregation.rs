use std::collections::BTreeMap;

use tracing::debug;

use super::domain::{FactorId, FactorScores, LoadingTable, ResponseSet};
use super::error::EngineError;

/// Sum `centered(response) * loading` per factor over every answered question.
///
/// Unanswered questions contribute nothing. Every response is validated before
/// any score is computed, so a failure never yields a partial result.
pub fn aggregate_responses(
    responses: &ResponseSet,
    loadings: &LoadingTable,
) -> Result<FactorScores, EngineError> {
    let scale = loadings.scale();

    for (question, value) in responses {
        if loadings.question(question).is_none() {
            return Err(EngineError::UnknownQuestion(question.clone()));
        }
        if !scale.contains(*value) {
            return Err(EngineError::ResponseOutOfRange {
                question: question.clone(),
                value: *value,
                min: scale.min(),
                max: scale.max(),
            });
        }
    }

    let mut totals: BTreeMap<FactorId, f64> = loadings
        .factors()
        .ids()
        .map(|factor| (factor.clone(), 0.0))
        .collect();

    for question in loadings.questions() {
        let Some(value) = responses.get(&question.id) else {
            continue;
        };
        let centered = scale.centered(*value);
        for loading in &question.loadings {
            if let Some(total) = totals.get_mut(&loading.factor) {
                *total += centered * loading.weight;
            }
        }
    }

    debug!(
        lens = %loadings.lens(),
        answered = responses.len(),
        questions = loadings.questions().len(),
        "aggregated questionnaire responses"
    );

    Ok(FactorScores::from_totals(loadings.lens(), totals))
}
