use crate::aspect::{Aspect, AspectSet};
use crate::ids::CardId;
use crate::types::CardType;

/// Static, immutable card record as supplied by the card database.
///
/// Cards are owned by the [`CardCatalog`](crate::catalog::CardCatalog) and are
/// never mutated by the deck engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub set_code: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub collector_number: String,
    #[cfg_attr(feature = "serialization", serde(rename = "type"))]
    pub card_type: CardType,
    /// Resource cost. Leaders and bases have none.
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub cost: Option<u32>,
    /// Aspects in printed order.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub aspects: Vec<Aspect>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub traits: Vec<String>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub keywords: Vec<String>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub unique: bool,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub text: Option<String>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub image_url: Option<String>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub rarity: Option<String>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub attack: Option<i32>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub health: Option<i32>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub defense: Option<i32>,
}

impl Card {
    /// Returns the card's aspects as a set.
    pub fn aspect_set(&self) -> AspectSet {
        self.aspects.iter().collect()
    }

    pub fn has_aspect(&self, aspect: Aspect) -> bool {
        self.aspects.contains(&aspect)
    }

    /// Returns true if this card shares at least one aspect with `aspects`.
    pub fn shares_aspect_with(&self, aspects: AspectSet) -> bool {
        self.aspect_set().intersects(aspects)
    }

    pub fn is_leader(&self) -> bool {
        self.card_type == CardType::Leader
    }

    pub fn is_base(&self) -> bool {
        self.card_type == CardType::Base
    }

    /// Returns true if this card can be counted in a deck ledger.
    pub fn is_playable(&self) -> bool {
        self.card_type.is_playable()
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t.eq_ignore_ascii_case(name))
    }
}

/// Builder for constructing Card instances.
#[derive(Debug, Clone)]
pub struct CardBuilder {
    id: CardId,
    name: String,
    set_code: String,
    collector_number: String,
    card_type: CardType,
    cost: Option<u32>,
    aspects: Vec<Aspect>,
    traits: Vec<String>,
    keywords: Vec<String>,
    unique: bool,
    text: Option<String>,
    image_url: Option<String>,
    rarity: Option<String>,
    attack: Option<i32>,
    health: Option<i32>,
    defense: Option<i32>,
}

impl CardBuilder {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            set_code: String::new(),
            collector_number: String::new(),
            card_type: CardType::Unit,
            cost: None,
            aspects: Vec::new(),
            traits: Vec::new(),
            keywords: Vec::new(),
            unique: false,
            text: None,
            image_url: None,
            rarity: None,
            attack: None,
            health: None,
            defense: None,
        }
    }

    pub fn set(mut self, set_code: impl Into<String>, collector_number: impl Into<String>) -> Self {
        self.set_code = set_code.into();
        self.collector_number = collector_number.into();
        self
    }

    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card_type = card_type;
        self
    }

    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn aspects(mut self, aspects: impl IntoIterator<Item = Aspect>) -> Self {
        self.aspects = aspects.into_iter().collect();
        self
    }

    pub fn traits<S: Into<String>>(mut self, traits: impl IntoIterator<Item = S>) -> Self {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = Some(attack);
        self.health = Some(health);
        self
    }

    pub fn defense(mut self, defense: i32) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn build(self) -> Card {
        Card {
            id: self.id,
            name: self.name,
            set_code: self.set_code,
            collector_number: self.collector_number,
            card_type: self.card_type,
            cost: self.cost,
            aspects: self.aspects,
            traits: self.traits,
            keywords: self.keywords,
            unique: self.unique,
            text: self.text,
            image_url: self.image_url,
            rarity: self.rarity,
            attack: self.attack,
            health: self.health,
            defense: self.defense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luke_leader() -> Card {
        CardBuilder::new("SOR-005", "Luke Skywalker")
            .set("SOR", "005")
            .card_type(CardType::Leader)
            .aspects([Aspect::Vigilance, Aspect::Heroism])
            .unique()
            .build()
    }

    fn battlefield_marine() -> Card {
        CardBuilder::new("SOR-095", "Battlefield Marine")
            .set("SOR", "095")
            .card_type(CardType::Unit)
            .cost(2)
            .aspects([Aspect::Command, Aspect::Heroism])
            .traits(["Rebel", "Trooper"])
            .stats(3, 3)
            .build()
    }

    #[test]
    fn test_leader_card() {
        let luke = luke_leader();
        assert!(luke.is_leader());
        assert!(!luke.is_playable());
        assert_eq!(luke.cost, None);
        assert!(luke.unique);
        assert_eq!(luke.aspect_set().count(), 2);
    }

    #[test]
    fn test_unit_card() {
        let marine = battlefield_marine();
        assert!(marine.is_playable());
        assert_eq!(marine.cost, Some(2));
        assert!(marine.has_aspect(Aspect::Heroism));
        assert!(!marine.has_aspect(Aspect::Villainy));
        assert!(marine.has_trait("rebel"));
        assert_eq!(marine.attack, Some(3));
    }

    #[test]
    fn test_shares_aspect_with() {
        let marine = battlefield_marine();
        let luke = luke_leader();
        assert!(marine.shares_aspect_with(luke.aspect_set()));
        assert!(!marine.shares_aspect_with(AspectSet::from(Aspect::Cunning)));
    }

    #[test]
    fn test_aspects_keep_printed_order() {
        let card = CardBuilder::new("x", "X")
            .aspects([Aspect::Villainy, Aspect::Aggression])
            .build();
        assert_eq!(card.aspects, vec![Aspect::Villainy, Aspect::Aggression]);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_card_deserializes_database_fields() {
        let json = r#"{
            "id": "SOR-095",
            "name": "Battlefield Marine",
            "set_code": "SOR",
            "collector_number": "095",
            "type": "unit",
            "cost": 2,
            "aspects": ["command", "heroism"],
            "traits": ["Rebel", "Trooper"],
            "keywords": [],
            "unique": false,
            "attack": 3,
            "health": 3
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card, battlefield_marine());
    }
}
