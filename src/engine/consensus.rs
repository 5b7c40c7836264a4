use serde::{Deserialize, Serialize};

use super::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusState {
    StronglyAligned,
    MildlyAligned,
    Neutral,
    MildlyDivergent,
    StronglyDivergent,
    Polarized,
}

impl ConsensusState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::StronglyAligned => "Strongly aligned",
            Self::MildlyAligned => "Mildly aligned",
            Self::Neutral => "Neutral",
            Self::MildlyDivergent => "Mildly divergent",
            Self::StronglyDivergent => "Strongly divergent",
            Self::Polarized => "Polarized",
        }
    }
}

/// Gaps up to and including `max_gap` fall into `state`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusBand {
    pub max_gap: f64,
    pub state: ConsensusState,
}

/// Per-lens classification thresholds on the display scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusThresholds {
    bands: Vec<ConsensusBand>,
    polarization: Option<f64>,
}

impl ConsensusThresholds {
    /// Bands must have finite, non-negative, strictly ascending `max_gap`s.
    pub fn new(bands: Vec<ConsensusBand>, polarization: Option<f64>) -> Result<Self, EngineError> {
        let mut previous = None;
        for band in &bands {
            if !band.max_gap.is_finite() || band.max_gap < 0.0 {
                return Err(EngineError::catalog(format!(
                    "consensus band gap {} must be finite and non-negative",
                    band.max_gap
                )));
            }
            if previous.is_some_and(|gap| band.max_gap <= gap) {
                return Err(EngineError::catalog(
                    "consensus bands must be strictly ascending",
                ));
            }
            previous = Some(band.max_gap);
        }
        if let Some(magnitude) = polarization {
            if !magnitude.is_finite() || magnitude <= 0.0 {
                return Err(EngineError::catalog(
                    "polarization magnitude must be finite and positive",
                ));
            }
        }

        Ok(Self {
            bands,
            polarization,
        })
    }

    /// Five-state ladder used when a lens does not tune its own.
    pub fn standard() -> Self {
        Self {
            bands: vec![
                ConsensusBand {
                    max_gap: 10.0,
                    state: ConsensusState::StronglyAligned,
                },
                ConsensusBand {
                    max_gap: 25.0,
                    state: ConsensusState::MildlyAligned,
                },
                ConsensusBand {
                    max_gap: 40.0,
                    state: ConsensusState::Neutral,
                },
                ConsensusBand {
                    max_gap: 60.0,
                    state: ConsensusState::MildlyDivergent,
                },
            ],
            polarization: Some(30.0),
        }
    }

    pub fn bands(&self) -> &[ConsensusBand] {
        &self.bands
    }

    pub fn polarization(&self) -> Option<f64> {
        self.polarization
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapDirection {
    /// The individual rates the policy higher than the baseline.
    Above,
    Below,
    Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsensusReading {
    pub state: ConsensusState,
    /// `score - baseline`.
    pub gap: f64,
    pub direction: GapDirection,
}

/// Bucket the gap between an individual score and a baseline score.
///
/// Opposite-signed scores that both reach the polarization magnitude are
/// `Polarized`; otherwise the first band covering `|gap|` decides, and gaps past
/// every band are `StronglyDivergent`.
pub fn classify_consensus(
    score: f64,
    baseline: f64,
    thresholds: &ConsensusThresholds,
) -> ConsensusState {
    if let Some(magnitude) = thresholds.polarization {
        let opposed = score.signum() != baseline.signum() && score != 0.0 && baseline != 0.0;
        if opposed && score.abs() >= magnitude && baseline.abs() >= magnitude {
            return ConsensusState::Polarized;
        }
    }

    let gap = (score - baseline).abs();
    thresholds
        .bands
        .iter()
        .find(|band| gap <= band.max_gap)
        .map(|band| band.state)
        .unwrap_or(ConsensusState::StronglyDivergent)
}

pub fn read_consensus(score: f64, baseline: f64, thresholds: &ConsensusThresholds) -> ConsensusReading {
    let gap = score - baseline;
    let direction = if gap > 0.0 {
        GapDirection::Above
    } else if gap < 0.0 {
        GapDirection::Below
    } else {
        GapDirection::Level
    };

    ConsensusReading {
        state: classify_consensus(score, baseline, thresholds),
        gap,
        direction,
    }
}
