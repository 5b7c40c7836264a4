use super::{FactorInfo, Lens, LensVersion};
use crate::engine::{
    Adjustment, ConsensusBand, ConsensusState, ConsensusThresholds, EngineError, LikertScale,
    ModifierCondition, PolicyModifier,
};

const ECONOMIC_FREEDOM: &str = "economic-freedom";
const SOCIAL_EQUALITY: &str = "social-equality";
const PERSONAL_LIBERTY: &str = "personal-liberty";
const TRADITION: &str = "tradition";

/// Four-axis compass: the first lens.
pub(super) fn lens() -> Result<Lens, EngineError> {
    Lens::builder(LensVersion::V1, "Compass")
        .summary("Four broad axes placing economic and social views on a simple compass.")
        .scale(LikertScale::symmetric(2)?)
        .factor(FactorInfo::new(
            ECONOMIC_FREEDOM,
            "Economic Freedom",
            "How far prices, production and exchange should be left to voluntary markets.",
            "Planned economy",
            "Free markets",
        ))
        .factor(FactorInfo::new(
            SOCIAL_EQUALITY,
            "Social Equality",
            "How strongly differences in wealth and status should be narrowed.",
            "Natural hierarchy",
            "Egalitarian",
        ))
        .factor(FactorInfo::new(
            PERSONAL_LIBERTY,
            "Personal Liberty",
            "How much room individuals should have to live by their own choices.",
            "Social order",
            "Personal autonomy",
        ))
        .factor(FactorInfo::new(
            TRADITION,
            "Tradition",
            "How much weight inherited customs and institutions should carry.",
            "Progressive change",
            "Inherited custom",
        ))
        .question(
            "c1",
            "Prices set by open competition allocate goods better than government planning.",
            &[(ECONOMIC_FREEDOM, 1.0)],
        )
        .question(
            "c2",
            "Key industries should be directed by the state.",
            &[(ECONOMIC_FREEDOM, -1.0), (SOCIAL_EQUALITY, 0.5)],
        )
        .question(
            "c3",
            "Large differences in wealth are harmful to a society.",
            &[(SOCIAL_EQUALITY, 1.0)],
        )
        .question(
            "c4",
            "People generally end up with the station in life they have earned.",
            &[(SOCIAL_EQUALITY, -1.0), (ECONOMIC_FREEDOM, 0.5)],
        )
        .question(
            "c5",
            "Adults should be free to make choices others consider unwise.",
            &[(PERSONAL_LIBERTY, 1.0)],
        )
        .question(
            "c6",
            "Public order sometimes justifies limits on speech and assembly.",
            &[(PERSONAL_LIBERTY, -1.0), (TRADITION, 0.5)],
        )
        .question(
            "c7",
            "Long-standing institutions deserve deference even when their rationale is unclear.",
            &[(TRADITION, 1.0)],
        )
        .question(
            "c8",
            "Society should regularly rethink its customs.",
            &[(TRADITION, -1.0)],
        )
        .archetype(
            "classical-liberal",
            "Classical Liberal",
            "Adam Smith",
            "Free exchange under the rule of law, with a modest state.",
            &[
                (ECONOMIC_FREEDOM, 0.8),
                (SOCIAL_EQUALITY, -0.2),
                (PERSONAL_LIBERTY, 0.6),
                (TRADITION, 0.1),
            ],
        )
        .archetype(
            "conservative",
            "Conservative",
            "Edmund Burke",
            "Prudence, continuity and respect for inherited institutions.",
            &[
                (ECONOMIC_FREEDOM, 0.4),
                (SOCIAL_EQUALITY, -0.4),
                (PERSONAL_LIBERTY, -0.3),
                (TRADITION, 0.9),
            ],
        )
        .archetype(
            "libertarian",
            "Libertarian",
            "Robert Nozick",
            "Self-ownership and a minimal state limited to protecting rights.",
            &[
                (ECONOMIC_FREEDOM, 1.0),
                (SOCIAL_EQUALITY, -0.6),
                (PERSONAL_LIBERTY, 0.9),
                (TRADITION, -0.2),
            ],
        )
        .archetype(
            "social-democrat",
            "Social Democrat",
            "John Rawls",
            "Fair institutions arranged to benefit the least advantaged.",
            &[
                (ECONOMIC_FREEDOM, -0.3),
                (SOCIAL_EQUALITY, 0.8),
                (PERSONAL_LIBERTY, 0.5),
                (TRADITION, -0.3),
            ],
        )
        .archetype(
            "socialist",
            "Socialist",
            "Karl Marx",
            "Common ownership of production and the end of class hierarchy.",
            &[
                (ECONOMIC_FREEDOM, -0.9),
                (SOCIAL_EQUALITY, 1.0),
                (PERSONAL_LIBERTY, 0.2),
                (TRADITION, -0.7),
            ],
        )
        .match_threshold(0.6)
        .population_baseline(&[
            (ECONOMIC_FREEDOM, 0.2),
            (SOCIAL_EQUALITY, 0.3),
            (PERSONAL_LIBERTY, 0.3),
            (TRADITION, 0.1),
        ])
        .policy(
            "universal-basic-income",
            "Universal Basic Income",
            "An unconditional monthly payment to every adult resident.",
            &[
                (ECONOMIC_FREEDOM, -0.2),
                (SOCIAL_EQUALITY, 0.9),
                (PERSONAL_LIBERTY, 0.4),
                (TRADITION, -0.3),
            ],
            vec![
                PolicyModifier::new(
                    "liberty-dividend",
                    "Market-minded liberty supporters value cash over in-kind programs.",
                    ModifierCondition::all_above(&[ECONOMIC_FREEDOM, PERSONAL_LIBERTY], 0.5),
                    Adjustment::Add(0.3),
                ),
                PolicyModifier::new(
                    "work-ethic-concern",
                    "Traditionalists already opposed read unconditional payments more harshly.",
                    ModifierCondition::all(vec![
                        ModifierCondition::weight_above(TRADITION, 0.5),
                        ModifierCondition::running_below(-0.5),
                    ]),
                    Adjustment::Scale(1.2),
                ),
            ],
        )
        .policy(
            "rent-control",
            "Rent Control",
            "Caps on annual rent increases for existing tenancies.",
            &[
                (ECONOMIC_FREEDOM, -0.8),
                (SOCIAL_EQUALITY, 0.6),
                (PERSONAL_LIBERTY, -0.1),
                (TRADITION, 0.0),
            ],
            vec![PolicyModifier::new(
                "supply-skeptic",
                "Strong market supporters expect reduced housing supply.",
                ModifierCondition::weight_above(ECONOMIC_FREEDOM, 0.6),
                Adjustment::Add(-0.2),
            )],
        )
        .policy(
            "drug-decriminalization",
            "Drug Decriminalization",
            "Personal possession handled as a health matter rather than a crime.",
            &[
                (ECONOMIC_FREEDOM, 0.2),
                (SOCIAL_EQUALITY, 0.3),
                (PERSONAL_LIBERTY, 0.9),
                (TRADITION, -0.8),
            ],
            vec![PolicyModifier::new(
                "public-order-concern",
                "Order-first respondents weigh visible disorder heavily.",
                ModifierCondition::weight_below(PERSONAL_LIBERTY, -0.4),
                Adjustment::Scale(1.25),
            )],
        )
        .consensus(ConsensusThresholds::new(
            vec![
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
            Some(25.0),
        )?)
        .build()
}
