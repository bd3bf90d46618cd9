use super::{AssistError, selected_pair};
use crate::aspect::AspectSet;
use crate::card::Card;
use crate::catalog::CardCatalog;
use crate::deck::DeckComposition;
use crate::ids::CardId;
use crate::ledger::Ledger;

/// A card suggested for the main deck, with the reasons behind its score.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Recommendation {
    pub card_id: CardId,
    pub name: String,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Rules-text phrases and the score they contribute. A rule matches when any
/// of its phrases occurs in the lowercased text; each rule counts once.
const TEXT_RULES: &[(&[&str], u32, &str)] = &[
    (
        &["when played", "when this enters play"],
        4,
        "when-played trigger",
    ),
    (&["ambush"], 4, "ambush"),
    (&["bounce", "return to hand"], 3, "bounce effect"),
    (&["draw", "card"], 3, "card advantage"),
    (&["heal", "health"], 2, "healing"),
    (&["attack", "damage"], 2, "damage"),
    (&["control", "stun"], 2, "control effect"),
];

const LEADER_SYNERGY: u32 = 3;
const BASE_SYNERGY: u32 = 2;
const CURVE_BONUS: u32 = 1;
const UNIQUE_BONUS: u32 = 1;

/// Suggest up to `limit` playable cards that are not yet in the main deck.
///
/// Results are ordered by score, highest first, then by name. Cards that
/// score zero are never suggested.
pub fn recommend(
    deck: &DeckComposition,
    catalog: &CardCatalog,
    limit: usize,
) -> Result<Vec<Recommendation>, AssistError> {
    let (leader, base) = selected_pair(deck, catalog)?;

    let mut recommendations: Vec<Recommendation> = catalog
        .playable()
        .filter(|card| deck.card_count(&card.id, Ledger::Main) == 0)
        .filter_map(|card| score_card(card, leader.aspect_set(), base.aspect_set()))
        .collect();
    recommendations.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    recommendations.truncate(limit);

    tracing::debug!(count = recommendations.len(), "computed recommendations");
    Ok(recommendations)
}

fn score_card(card: &Card, leader: AspectSet, base: AspectSet) -> Option<Recommendation> {
    let mut score = 0;
    let mut reasons = Vec::new();

    let aspects = card.aspect_set();
    let slots = [("leader", leader, LEADER_SYNERGY), ("base", base, BASE_SYNERGY)];
    for (slot, slot_aspects, weight) in slots {
        let shared = aspects.intersection(slot_aspects);
        if !shared.is_empty() {
            score += weight;
            let names: Vec<&str> = shared.iter().map(|aspect| aspect.as_str()).collect();
            reasons.push(format!("shares {} with {slot}", names.join(", ")));
        }
    }

    if let Some(text) = card.text.as_deref() {
        let text = text.to_lowercase();
        for (phrases, weight, reason) in TEXT_RULES {
            if phrases.iter().any(|phrase| text.contains(phrase)) {
                score += weight;
                reasons.push((*reason).to_string());
            }
        }
    }

    match card.cost {
        Some(cost) if cost <= 2 => {
            score += CURVE_BONUS;
            reasons.push("low cost".to_string());
        }
        Some(cost) if cost >= 5 => {
            score += CURVE_BONUS;
            reasons.push("high cost".to_string());
        }
        _ => {}
    }

    if card.unique {
        score += UNIQUE_BONUS;
        reasons.push("unique".to_string());
    }

    (score > 0).then(|| Recommendation {
        card_id: card.id.clone(),
        name: card.name.clone(),
        score,
        reasons,
    })
}
