use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Deserialize;

use crate::util::title_case;

const DEFAULT_PLATFORMS: [&str; 14] = [
    "STAKE",
    "RENDITY",
    "BRICKS",
    "BRXS",
    "MONIWAN",
    "CORUM",
    "MINTOS",
    "REVOLUT",
    "GOPARITY",
    "NEXO",
    "SPLINT INVEST",
    "KONVI",
    "TIMELESS",
    "LA PREMIÈRE BRIQUE",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardRef(usize);

#[derive(Clone, Debug, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
}

pub struct CardDeck {
    cards: Vec<Card>,
    index_by_title: HashMap<String, usize>,
}

impl CardDeck {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut deduped = Vec::with_capacity(cards.len());
        let mut index_by_title = HashMap::with_capacity(cards.len());

        for card in cards {
            let key = card.title.trim().to_lowercase();
            if key.is_empty() || index_by_title.contains_key(&key) {
                continue;
            }
            index_by_title.insert(key, deduped.len());
            deduped.push(card);
        }

        Self {
            cards: deduped,
            index_by_title,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self, card: CardRef) -> usize {
        card.0
    }

    /// Balloon labels: card titles in deck order, display-normalized.
    pub fn labels(&self) -> Vec<String> {
        self.cards
            .iter()
            .map(|card| title_case(card.title.trim()))
            .collect()
    }

    /// Maps a balloon label back to its card. Exact case-insensitive title
    /// match first, best fuzzy score as the fallback.
    pub fn resolve_label(&self, label: &str) -> Option<CardRef> {
        let key = label.trim().to_lowercase();
        if let Some(&index) = self.index_by_title.get(&key) {
            return Some(CardRef(index));
        }

        let matcher = SkimMatcherV2::default();
        self.cards
            .iter()
            .enumerate()
            .filter_map(|(index, card)| {
                matcher
                    .fuzzy_match(&card.title.to_lowercase(), &key)
                    .map(|score| (score, index))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, index)| CardRef(index))
    }
}

pub fn default_deck() -> CardDeck {
    CardDeck::from_cards(
        DEFAULT_PLATFORMS
            .iter()
            .map(|title| Card {
                title: (*title).to_owned(),
                description: String::new(),
                url: None,
            })
            .collect(),
    )
}

pub fn load_card_deck(path: &Path) -> Result<CardDeck> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read card file {}", path.display()))?;

    let cards: Vec<Card> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse card file {}", path.display()))?;

    if cards.is_empty() {
        return Err(anyhow!("card file {} contains no cards", path.display()));
    }

    let deck = CardDeck::from_cards(cards);
    if deck.is_empty() {
        return Err(anyhow!(
            "card file {} contains no usable card titles",
            path.display()
        ));
    }

    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str) -> Card {
        Card {
            title: title.to_owned(),
            description: String::new(),
            url: None,
        }
    }

    #[test]
    fn dedups_titles_case_insensitively_preserving_order() {
        let deck = CardDeck::from_cards(vec![
            card("Stake"),
            card("STAKE"),
            card("Rendity"),
            card("  "),
            card("stake"),
        ]);

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards()[0].title, "Stake");
        assert_eq!(deck.cards()[1].title, "Rendity");
    }

    #[test]
    fn labels_are_title_cased() {
        let deck = CardDeck::from_cards(vec![card("SPLINT INVEST"), card("nexo")]);
        assert_eq!(deck.labels(), vec!["Splint Invest", "Nexo"]);
    }

    #[test]
    fn default_deck_is_populated() {
        let deck = default_deck();
        assert_eq!(deck.len(), DEFAULT_PLATFORMS.len());
        assert!(deck.labels().contains(&"La Première Brique".to_owned()));
    }

    #[test]
    fn resolves_labels_case_insensitively() {
        let deck = default_deck();
        let resolved = deck.resolve_label("Stake").expect("exact match");
        assert_eq!(deck.cards()[deck.index(resolved)].title, "STAKE");
    }

    #[test]
    fn resolves_partial_labels_through_fuzzy_fallback() {
        let deck = default_deck();
        let resolved = deck.resolve_label("Splint").expect("fuzzy match");
        assert_eq!(deck.cards()[deck.index(resolved)].title, "SPLINT INVEST");
    }

    #[test]
    fn unresolvable_labels_return_none() {
        let deck = CardDeck::from_cards(vec![card("Stake"), card("Nexo")]);
        assert!(deck.resolve_label("Zzzzqqq").is_none());
    }
}
