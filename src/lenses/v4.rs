use super::{FactorInfo, Lens, LensVersion};
use crate::engine::{
    Adjustment, ConsensusBand, ConsensusState, ConsensusThresholds, EngineError, LikertScale,
    ModifierCondition, PolicyModifier,
};

const MARKETS: &str = "markets";
const EQUALITY: &str = "equality";
const LIBERTY: &str = "liberty";
const AUTHORITY: &str = "authority";
const SUSTAINABILITY: &str = "sustainability";
const GLOBALISM: &str = "globalism";

/// Integrated lens combining economic, civic, ecological and international axes.
pub(super) fn lens() -> Result<Lens, EngineError> {
    Lens::builder(LensVersion::V4, "Integrated")
        .summary("Six axes spanning markets, equality, liberty, authority, ecology and sovereignty.")
        .scale(LikertScale::symmetric(2)?)
        .factor(FactorInfo::new(
            MARKETS,
            "Markets",
            "Reliance on markets rather than collective provision.",
            "Collective provision",
            "Market provision",
        ))
        .factor(FactorInfo::new(
            EQUALITY,
            "Equality",
            "Commitment to narrowing differences in outcomes.",
            "Earned inequality",
            "Equal outcomes",
        ))
        .factor(FactorInfo::new(
            LIBERTY,
            "Liberty",
            "Protection of private choices from collective interference.",
            "Collective discipline",
            "Individual choice",
        ))
        .factor(FactorInfo::new(
            AUTHORITY,
            "Authority",
            "Preference for concentrated, decisive leadership.",
            "Dispersed power",
            "Strong leadership",
        ))
        .factor(FactorInfo::new(
            SUSTAINABILITY,
            "Sustainability",
            "Acceptance of ecological limits on growth.",
            "Growth first",
            "Planetary limits",
        ))
        .factor(FactorInfo::new(
            GLOBALISM,
            "Globalism",
            "Support for binding international cooperation.",
            "National sovereignty",
            "Global cooperation",
        ))
        .question(
            "i1",
            "Competition brings out the best in people and products.",
            &[(MARKETS, 1.0)],
        )
        .question(
            "i2",
            "Healthcare should never be sold for profit.",
            &[(MARKETS, -1.0), (EQUALITY, 0.4)],
        )
        .question(
            "i3",
            "A fair society narrows the gap between rich and poor.",
            &[(EQUALITY, 1.0)],
        )
        .question(
            "i4",
            "Inequality is the natural result of different effort and talent.",
            &[(EQUALITY, -1.0), (MARKETS, 0.3)],
        )
        .question(
            "i5",
            "What consenting adults do in private is no one else's business.",
            &[(LIBERTY, 1.0)],
        )
        .question(
            "i6",
            "Individual freedoms must yield when they threaten social cohesion.",
            &[(LIBERTY, -1.0), (AUTHORITY, 0.5)],
        )
        .question(
            "i7",
            "A country needs a strong leader more than it needs debate.",
            &[(AUTHORITY, 1.0)],
        )
        .question(
            "i8",
            "Power is safest when split among many hands.",
            &[(AUTHORITY, -1.0)],
        )
        .question(
            "i9",
            "We should accept slower growth to stay within ecological limits.",
            &[(SUSTAINABILITY, 1.0)],
        )
        .question(
            "i10",
            "Technology will solve environmental problems without lifestyle change.",
            &[(SUSTAINABILITY, -1.0), (MARKETS, 0.2)],
        )
        .question(
            "i11",
            "International institutions should have binding authority on shared problems.",
            &[(GLOBALISM, 1.0)],
        )
        .question(
            "i12",
            "A nation's own interests should always come first.",
            &[(GLOBALISM, -1.0), (AUTHORITY, 0.3)],
        )
        .archetype(
            "anarcho-communist",
            "Anarcho-Communist",
            "Peter Kropotkin",
            "Mutual aid and voluntary federation without the state.",
            &[
                (MARKETS, -0.9),
                (EQUALITY, 1.0),
                (LIBERTY, 0.8),
                (AUTHORITY, -1.0),
                (SUSTAINABILITY, 0.6),
                (GLOBALISM, 0.5),
            ],
        )
        .archetype(
            "classical-liberal",
            "Classical Liberal",
            "Adam Smith",
            "Open markets, open borders to trade and limited government.",
            &[
                (MARKETS, 0.9),
                (EQUALITY, -0.3),
                (LIBERTY, 0.8),
                (AUTHORITY, -0.4),
                (SUSTAINABILITY, -0.1),
                (GLOBALISM, 0.6),
            ],
        )
        .archetype(
            "leviathan",
            "Sovereigntist",
            "Thomas Hobbes",
            "A strong sovereign guaranteeing order above individual claims.",
            &[
                (MARKETS, 0.2),
                (EQUALITY, -0.3),
                (LIBERTY, -0.8),
                (AUTHORITY, 1.0),
                (SUSTAINABILITY, -0.2),
                (GLOBALISM, -0.7),
            ],
        )
        .archetype(
            "objectivist",
            "Objectivist",
            "Ayn Rand",
            "Rational self-interest and laissez-faire capitalism.",
            &[
                (MARKETS, 1.0),
                (EQUALITY, -0.9),
                (LIBERTY, 0.9),
                (AUTHORITY, -0.5),
                (SUSTAINABILITY, -0.6),
                (GLOBALISM, -0.1),
            ],
        )
        .archetype(
            "rawlsian",
            "Liberal Egalitarian",
            "John Rawls",
            "Equal basic liberties and inequalities only to the benefit of the worst off.",
            &[
                (MARKETS, 0.1),
                (EQUALITY, 0.8),
                (LIBERTY, 0.6),
                (AUTHORITY, -0.2),
                (SUSTAINABILITY, 0.3),
                (GLOBALISM, 0.5),
            ],
        )
        .archetype(
            "steady-state",
            "Steady-State Ecologist",
            "Herman Daly",
            "An economy sized to what the biosphere can sustain.",
            &[
                (MARKETS, -0.3),
                (EQUALITY, 0.5),
                (LIBERTY, 0.2),
                (AUTHORITY, 0.0),
                (SUSTAINABILITY, 1.0),
                (GLOBALISM, 0.4),
            ],
        )
        .match_threshold(0.7)
        .population_baseline(&[
            (MARKETS, 0.2),
            (EQUALITY, 0.4),
            (LIBERTY, 0.4),
            (AUTHORITY, -0.1),
            (SUSTAINABILITY, 0.3),
            (GLOBALISM, 0.2),
        ])
        .policy(
            "universal-healthcare",
            "Universal Healthcare",
            "A single public insurer covering every resident.",
            &[
                (MARKETS, -0.7),
                (EQUALITY, 0.9),
                (LIBERTY, 0.1),
                (AUTHORITY, 0.1),
                (SUSTAINABILITY, 0.1),
                (GLOBALISM, 0.2),
            ],
            vec![
                PolicyModifier::new(
                    "public-option-appeal",
                    "Supporters who prize choice warm further to a system with opt-outs.",
                    ModifierCondition::all(vec![
                        ModifierCondition::weight_above(LIBERTY, 0.5),
                        ModifierCondition::running_above(0.0),
                    ]),
                    Adjustment::Add(0.1),
                ),
                PolicyModifier::new(
                    "cost-anxiety",
                    "Those comfortable with inequality focus on the tax bill.",
                    ModifierCondition::weight_below(EQUALITY, -0.5),
                    Adjustment::Scale(1.3),
                ),
            ],
        )
        .policy(
            "border-carbon-adjustment",
            "Border Carbon Adjustment",
            "A carbon levy on imports from countries without comparable pricing.",
            &[
                (MARKETS, 0.1),
                (EQUALITY, 0.1),
                (LIBERTY, -0.1),
                (AUTHORITY, 0.2),
                (SUSTAINABILITY, 0.9),
                (GLOBALISM, -0.4),
            ],
            vec![
                PolicyModifier::new(
                    "sovereignty-frame",
                    "Sovereigntists read the levy as protecting domestic industry.",
                    ModifierCondition::weight_below(GLOBALISM, -0.5),
                    Adjustment::Add(0.25),
                ),
                PolicyModifier::new(
                    "trade-war-fear",
                    "Free traders already opposed fear retaliation.",
                    ModifierCondition::all(vec![
                        ModifierCondition::weight_above(MARKETS, 0.6),
                        ModifierCondition::running_below(0.0),
                    ]),
                    Adjustment::Scale(1.4),
                ),
            ],
        )
        .policy(
            "surveillance-expansion",
            "Surveillance Expansion",
            "Broader warrantless access to communications metadata.",
            &[
                (MARKETS, 0.0),
                (EQUALITY, -0.1),
                (LIBERTY, -1.0),
                (AUTHORITY, 0.9),
                (SUSTAINABILITY, 0.0),
                (GLOBALISM, -0.2),
            ],
            vec![PolicyModifier::new(
                "security-first",
                "Strong-leadership respondents weigh security gains heavily.",
                ModifierCondition::weight_above(AUTHORITY, 0.6),
                Adjustment::Scale(1.25),
            )],
        )
        .policy(
            "free-trade-pact",
            "Free Trade Pact",
            "A multilateral agreement removing tariffs among member states.",
            &[
                (MARKETS, 0.9),
                (EQUALITY, -0.3),
                (LIBERTY, 0.3),
                (AUTHORITY, -0.1),
                (SUSTAINABILITY, -0.4),
                (GLOBALISM, 0.9),
            ],
            Vec::new(),
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
            Some(30.0),
        )?)
        .build()
}
