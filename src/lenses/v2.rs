use super::{FactorInfo, Lens, LensVersion};
use crate::engine::{
    Adjustment, ConsensusBand, ConsensusState, ConsensusThresholds, EngineError,
    ModifierCondition, PolicyModifier,
};

const MARKET_REGULATION: &str = "market-regulation";
const REDISTRIBUTION: &str = "redistribution";
const PUBLIC_OWNERSHIP: &str = "public-ownership";
const FISCAL_RESTRAINT: &str = "fiscal-restraint";
const LABOR_POWER: &str = "labor-power";

pub(super) fn lens() -> Result<Lens, EngineError> {
    Lens::builder(LensVersion::V2, "Political Economy")
        .summary("Five economic dimensions separating regulation, ownership, budgets and labor.")
        .factor(FactorInfo::new(
            MARKET_REGULATION,
            "Market Regulation",
            "How actively the state should supervise and correct markets.",
            "Laissez-faire",
            "Managed markets",
        ))
        .factor(FactorInfo::new(
            REDISTRIBUTION,
            "Redistribution",
            "How much income and wealth should be moved through taxes and transfers.",
            "Market outcomes",
            "Shared prosperity",
        ))
        .factor(FactorInfo::new(
            PUBLIC_OWNERSHIP,
            "Public Ownership",
            "Whether essential enterprises belong in public or private hands.",
            "Private enterprise",
            "Common ownership",
        ))
        .factor(FactorInfo::new(
            FISCAL_RESTRAINT,
            "Fiscal Restraint",
            "How strictly public budgets should be balanced over time.",
            "Deficit spending",
            "Balanced budgets",
        ))
        .factor(FactorInfo::new(
            LABOR_POWER,
            "Labor Power",
            "How much bargaining power and voice workers should hold.",
            "Employer prerogative",
            "Worker voice",
        ))
        .question(
            "e1",
            "Financial markets need strong regulators to prevent crises.",
            &[(MARKET_REGULATION, 1.0)],
        )
        .question(
            "e2",
            "Most industry rules do more harm than good.",
            &[(MARKET_REGULATION, -1.0)],
        )
        .question(
            "e3",
            "The wealthy should pay a much larger share of taxes.",
            &[(REDISTRIBUTION, 1.0)],
        )
        .question(
            "e4",
            "Welfare programs discourage people from working.",
            &[(REDISTRIBUTION, -1.0), (LABOR_POWER, -0.3)],
        )
        .question(
            "e5",
            "Utilities like water and power should be publicly owned.",
            &[(PUBLIC_OWNERSHIP, 1.0), (MARKET_REGULATION, 0.3)],
        )
        .question(
            "e6",
            "Private firms run services more efficiently than government.",
            &[(PUBLIC_OWNERSHIP, -1.0)],
        )
        .question(
            "e7",
            "Governments should balance their budgets even during downturns.",
            &[(FISCAL_RESTRAINT, 1.0)],
        )
        .question(
            "e8",
            "Public debt is an acceptable price for investing in the future.",
            &[(FISCAL_RESTRAINT, -1.0)],
        )
        .question(
            "e9",
            "Workers should elect representatives to company boards.",
            &[(LABOR_POWER, 1.0)],
        )
        .question(
            "e10",
            "Unions hold back economic growth.",
            &[(LABOR_POWER, -1.0)],
        )
        .archetype(
            "austrian",
            "Austrian Liberal",
            "Friedrich Hayek",
            "Spontaneous order, sound money and suspicion of central planning.",
            &[
                (MARKET_REGULATION, -0.9),
                (REDISTRIBUTION, -0.7),
                (PUBLIC_OWNERSHIP, -0.8),
                (FISCAL_RESTRAINT, 0.8),
                (LABOR_POWER, -0.5),
            ],
        )
        .archetype(
            "cooperative",
            "Commons Steward",
            "Elinor Ostrom",
            "Self-governed commons and polycentric institutions.",
            &[
                (MARKET_REGULATION, 0.2),
                (REDISTRIBUTION, 0.3),
                (PUBLIC_OWNERSHIP, 0.4),
                (FISCAL_RESTRAINT, 0.3),
                (LABOR_POWER, 0.6),
            ],
        )
        .archetype(
            "keynesian",
            "Keynesian",
            "John Maynard Keynes",
            "Active demand management and counter-cyclical spending.",
            &[
                (MARKET_REGULATION, 0.5),
                (REDISTRIBUTION, 0.4),
                (PUBLIC_OWNERSHIP, 0.1),
                (FISCAL_RESTRAINT, -0.8),
                (LABOR_POWER, 0.3),
            ],
        )
        .archetype(
            "market-socialist",
            "Market Socialist",
            "Oskar Lange",
            "Social ownership of capital with markets for goods.",
            &[
                (MARKET_REGULATION, 0.6),
                (REDISTRIBUTION, 0.8),
                (PUBLIC_OWNERSHIP, 0.7),
                (FISCAL_RESTRAINT, -0.2),
                (LABOR_POWER, 0.9),
            ],
        )
        .archetype(
            "ordoliberal",
            "Ordoliberal",
            "Walter Eucken",
            "A strong framework of competition rules and fiscal discipline.",
            &[
                (MARKET_REGULATION, 0.4),
                (REDISTRIBUTION, -0.1),
                (PUBLIC_OWNERSHIP, -0.4),
                (FISCAL_RESTRAINT, 0.9),
                (LABOR_POWER, 0.1),
            ],
        )
        .match_threshold(0.65)
        .population_baseline(&[
            (MARKET_REGULATION, 0.3),
            (REDISTRIBUTION, 0.3),
            (PUBLIC_OWNERSHIP, -0.1),
            (FISCAL_RESTRAINT, 0.2),
            (LABOR_POWER, 0.2),
        ])
        .policy(
            "wealth-tax",
            "Annual Wealth Tax",
            "A two percent yearly levy on net wealth above a high exemption.",
            &[
                (MARKET_REGULATION, 0.3),
                (REDISTRIBUTION, 1.0),
                (PUBLIC_OWNERSHIP, 0.2),
                (FISCAL_RESTRAINT, 0.4),
                (LABOR_POWER, 0.1),
            ],
            vec![
                PolicyModifier::new(
                    "capital-flight-worry",
                    "Committed free-marketeers expect capital to leave.",
                    ModifierCondition::all_below(&[MARKET_REGULATION, PUBLIC_OWNERSHIP], -0.5),
                    Adjustment::Scale(1.3),
                ),
                PolicyModifier::new(
                    "revenue-earmark",
                    "Budget hawks who already lean in favor welcome the deficit reduction.",
                    ModifierCondition::all(vec![
                        ModifierCondition::weight_above(FISCAL_RESTRAINT, 0.5),
                        ModifierCondition::running_above(0.0),
                    ]),
                    Adjustment::Add(0.15),
                ),
            ],
        )
        .policy(
            "nationalize-rail",
            "Rail Nationalization",
            "Bringing passenger rail franchises back into public ownership.",
            &[
                (MARKET_REGULATION, 0.4),
                (REDISTRIBUTION, 0.3),
                (PUBLIC_OWNERSHIP, 1.0),
                (FISCAL_RESTRAINT, -0.3),
                (LABOR_POWER, 0.4),
            ],
            vec![PolicyModifier::new(
                "efficiency-doubt",
                "Strong privatizers doubt public operators can run trains well.",
                ModifierCondition::weight_below(PUBLIC_OWNERSHIP, -0.6),
                Adjustment::Add(-0.25),
            )],
        )
        .policy(
            "deficit-stimulus",
            "Deficit-Financed Stimulus",
            "Borrowing to fund infrastructure and hiring during a downturn.",
            &[
                (MARKET_REGULATION, 0.2),
                (REDISTRIBUTION, 0.3),
                (PUBLIC_OWNERSHIP, 0.1),
                (FISCAL_RESTRAINT, -1.0),
                (LABOR_POWER, 0.3),
            ],
            vec![
                PolicyModifier::new(
                    "austerity-backlash",
                    "Deficit hawks react more strongly than the projection implies.",
                    ModifierCondition::weight_above(FISCAL_RESTRAINT, 0.7),
                    Adjustment::Scale(1.5),
                ),
                PolicyModifier::new(
                    "jobs-guarantee",
                    "Labor advocates already in favor value the hiring component.",
                    ModifierCondition::all(vec![
                        ModifierCondition::weight_above(LABOR_POWER, 0.5),
                        ModifierCondition::running_above(0.2),
                    ]),
                    Adjustment::Add(0.2),
                ),
            ],
        )
        .policy(
            "right-to-work",
            "Right-to-Work Law",
            "Prohibiting contracts that require union membership or dues.",
            &[
                (MARKET_REGULATION, -0.6),
                (REDISTRIBUTION, -0.3),
                (PUBLIC_OWNERSHIP, -0.2),
                (FISCAL_RESTRAINT, 0.1),
                (LABOR_POWER, -1.0),
            ],
            Vec::new(),
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
            Some(35.0),
        )?)
        .build()
}
