use super::{FactorInfo, Lens, LensVersion};
use crate::engine::{
    Adjustment, ConsensusBand, ConsensusState, ConsensusThresholds, EngineError, LikertScale,
    ModifierCondition, PolicyModifier,
};

const INDIVIDUAL_LIBERTY: &str = "individual-liberty";
const COLLECTIVE_WELFARE: &str = "collective-welfare";
const INSTITUTIONAL_TRUST: &str = "institutional-trust";
const LOCALISM: &str = "localism";
const ENVIRONMENTAL_STEWARDSHIP: &str = "environmental-stewardship";

// Seven-point scale; finer thresholds to match.
pub(super) fn lens() -> Result<Lens, EngineError> {
    Lens::builder(LensVersion::V3, "Civic Order")
        .summary("Civic and institutional values on a seven-point scale.")
        .scale(LikertScale::symmetric(3)?)
        .factor(FactorInfo::new(
            INDIVIDUAL_LIBERTY,
            "Individual Liberty",
            "Priority given to personal choice over collective mandates.",
            "Collective mandate",
            "Individual choice",
        ))
        .factor(FactorInfo::new(
            COLLECTIVE_WELFARE,
            "Collective Welfare",
            "Concern for shared wellbeing and the most vulnerable.",
            "Self-reliance",
            "Mutual obligation",
        ))
        .factor(FactorInfo::new(
            INSTITUTIONAL_TRUST,
            "Institutional Trust",
            "Confidence in courts, agencies, elections and official data.",
            "Skeptical",
            "Trusting",
        ))
        .factor(FactorInfo::new(
            LOCALISM,
            "Localism",
            "Preference for decisions made close to the people affected.",
            "National standards",
            "Local control",
        ))
        .factor(FactorInfo::new(
            ENVIRONMENTAL_STEWARDSHIP,
            "Environmental Stewardship",
            "Willingness to trade growth for ecological protection.",
            "Growth first",
            "Ecology first",
        ))
        .question(
            "g1",
            "The state should stay out of decisions that only affect the individual.",
            &[(INDIVIDUAL_LIBERTY, 1.0)],
        )
        .question(
            "g2",
            "Mandates are justified when they protect public health.",
            &[(INDIVIDUAL_LIBERTY, -0.7), (COLLECTIVE_WELFARE, 0.7)],
        )
        .question(
            "g3",
            "A good society is measured by how it treats its most vulnerable.",
            &[(COLLECTIVE_WELFARE, 1.0)],
        )
        .question(
            "g4",
            "Courts, agencies and elections are broadly trustworthy.",
            &[(INSTITUTIONAL_TRUST, 1.0)],
        )
        .question(
            "g5",
            "Official statistics are often shaped to serve those in power.",
            &[(INSTITUTIONAL_TRUST, -1.0)],
        )
        .question(
            "g6",
            "Decisions should be made at the most local level possible.",
            &[(LOCALISM, 1.0)],
        )
        .question(
            "g7",
            "National standards matter more than regional variation.",
            &[(LOCALISM, -1.0), (INSTITUTIONAL_TRUST, 0.3)],
        )
        .question(
            "g8",
            "Economic growth should give way when it damages ecosystems.",
            &[(ENVIRONMENTAL_STEWARDSHIP, 1.0)],
        )
        .question(
            "g9",
            "Environmental rules are mostly an obstacle for working people.",
            &[(ENVIRONMENTAL_STEWARDSHIP, -1.0), (COLLECTIVE_WELFARE, -0.3)],
        )
        .archetype(
            "communitarian",
            "Communitarian",
            "Alasdair MacIntyre",
            "Virtue cultivated within local communities and shared traditions.",
            &[
                (INDIVIDUAL_LIBERTY, -0.3),
                (COLLECTIVE_WELFARE, 0.7),
                (INSTITUTIONAL_TRUST, 0.2),
                (LOCALISM, 0.8),
                (ENVIRONMENTAL_STEWARDSHIP, 0.3),
            ],
        )
        .archetype(
            "green-municipalist",
            "Green Municipalist",
            "Murray Bookchin",
            "Ecological confederations of self-governing towns.",
            &[
                (INDIVIDUAL_LIBERTY, 0.2),
                (COLLECTIVE_WELFARE, 0.6),
                (INSTITUTIONAL_TRUST, -0.5),
                (LOCALISM, 0.9),
                (ENVIRONMENTAL_STEWARDSHIP, 1.0),
            ],
        )
        .archetype(
            "guardian",
            "Guardian",
            "Plato",
            "Rule by trained experts in the interest of the whole.",
            &[
                (INDIVIDUAL_LIBERTY, -0.6),
                (COLLECTIVE_WELFARE, 0.5),
                (INSTITUTIONAL_TRUST, 1.0),
                (LOCALISM, -0.7),
                (ENVIRONMENTAL_STEWARDSHIP, 0.2),
            ],
        )
        .archetype(
            "harm-principle",
            "Harm-Principle Liberal",
            "John Stuart Mill",
            "Liberty limited only to prevent harm to others.",
            &[
                (INDIVIDUAL_LIBERTY, 1.0),
                (COLLECTIVE_WELFARE, 0.1),
                (INSTITUTIONAL_TRUST, 0.3),
                (LOCALISM, 0.2),
                (ENVIRONMENTAL_STEWARDSHIP, -0.1),
            ],
        )
        .archetype(
            "liberal-institutionalist",
            "Liberal Institutionalist",
            "James Madison",
            "Checks and balances channelling interests through durable institutions.",
            &[
                (INDIVIDUAL_LIBERTY, 0.5),
                (COLLECTIVE_WELFARE, 0.2),
                (INSTITUTIONAL_TRUST, 0.9),
                (LOCALISM, -0.2),
                (ENVIRONMENTAL_STEWARDSHIP, 0.1),
            ],
        )
        .match_threshold(0.6)
        .population_baseline(&[
            (INDIVIDUAL_LIBERTY, 0.4),
            (COLLECTIVE_WELFARE, 0.4),
            (INSTITUTIONAL_TRUST, 0.1),
            (LOCALISM, 0.2),
            (ENVIRONMENTAL_STEWARDSHIP, 0.3),
        ])
        .policy(
            "carbon-tax",
            "Carbon Tax",
            "A rising per-tonne charge on fossil carbon at the point of extraction.",
            &[
                (INDIVIDUAL_LIBERTY, -0.2),
                (COLLECTIVE_WELFARE, 0.3),
                (INSTITUTIONAL_TRUST, 0.2),
                (LOCALISM, -0.3),
                (ENVIRONMENTAL_STEWARDSHIP, 1.0),
            ],
            vec![
                PolicyModifier::new(
                    "dividend-return",
                    "Liberty-minded respondents prefer a price signal returned as a dividend.",
                    ModifierCondition::weight_above(INDIVIDUAL_LIBERTY, 0.5),
                    Adjustment::Add(0.2),
                ),
                PolicyModifier::new(
                    "distrust-discount",
                    "Low institutional trust dampens enthusiasm for any new levy.",
                    ModifierCondition::weight_below(INSTITUTIONAL_TRUST, -0.5),
                    Adjustment::Scale(0.6),
                ),
            ],
        )
        .policy(
            "participatory-budgeting",
            "Participatory Budgeting",
            "Residents vote directly on a share of the municipal capital budget.",
            &[
                (INDIVIDUAL_LIBERTY, 0.2),
                (COLLECTIVE_WELFARE, 0.4),
                (INSTITUTIONAL_TRUST, -0.2),
                (LOCALISM, 1.0),
                (ENVIRONMENTAL_STEWARDSHIP, 0.2),
            ],
            Vec::new(),
        )
        .policy(
            "vaccine-mandate",
            "Workplace Vaccine Mandate",
            "Vaccination required for in-person work in large employers.",
            &[
                (INDIVIDUAL_LIBERTY, -1.0),
                (COLLECTIVE_WELFARE, 0.8),
                (INSTITUTIONAL_TRUST, 0.5),
                (LOCALISM, -0.4),
                (ENVIRONMENTAL_STEWARDSHIP, 0.0),
            ],
            vec![PolicyModifier::new(
                "trust-amplifier",
                "High trust strengthens existing support for public-health rules.",
                ModifierCondition::all(vec![
                    ModifierCondition::weight_above(INSTITUTIONAL_TRUST, 0.6),
                    ModifierCondition::running_above(0.0),
                ]),
                Adjustment::Scale(1.2),
            )],
        )
        .consensus(ConsensusThresholds::new(
            vec![
                ConsensusBand {
                    max_gap: 8.0,
                    state: ConsensusState::StronglyAligned,
                },
                ConsensusBand {
                    max_gap: 20.0,
                    state: ConsensusState::MildlyAligned,
                },
                ConsensusBand {
                    max_gap: 35.0,
                    state: ConsensusState::Neutral,
                },
                ConsensusBand {
                    max_gap: 55.0,
                    state: ConsensusState::MildlyDivergent,
                },
            ],
            Some(20.0),
        )?)
        .build()
}
