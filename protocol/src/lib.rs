//! Wire format of a saved round.
//!
//! Field names are part of the persisted contract and must not change.

use serde::{Deserialize, Serialize};

/// Durable projection of an in-progress round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub rows: u32,
    pub columns: u32,
    pub time_left: f32,
    pub current_score: u32,
    pub cards: Vec<CardSaveData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSaveData {
    pub card_id: u32,
    pub sprite_name: String,
    /// Kept for format compatibility, never read back.
    #[serde(default)]
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl SaveData {
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SaveData {
        SaveData {
            rows: 2,
            columns: 2,
            time_left: 12.5,
            current_score: 1,
            cards: vec![
                CardSaveData {
                    card_id: 1,
                    sprite_name: "owl".to_string(),
                    is_flipped: false,
                    is_matched: false,
                },
                CardSaveData {
                    card_id: 0,
                    sprite_name: "fox".to_string(),
                    is_flipped: false,
                    is_matched: true,
                },
            ],
        }
    }

    #[test]
    fn field_names_follow_persisted_schema() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["rows"], 2);
        assert_eq!(value["columns"], 2);
        assert_eq!(value["timeLeft"], 12.5);
        assert_eq!(value["currentScore"], 1);
        assert_eq!(value["cards"][0]["cardId"], 1);
        assert_eq!(value["cards"][0]["spriteName"], "owl");
        assert_eq!(value["cards"][0]["isFlipped"], false);
        assert_eq!(value["cards"][1]["isMatched"], true);
    }

    #[test]
    fn missing_is_flipped_defaults_to_false() {
        let raw = br#"{"rows":1,"columns":2,"timeLeft":3.0,"currentScore":0,
            "cards":[{"cardId":0,"spriteName":"a","isMatched":false},
                     {"cardId":0,"spriteName":"a","isMatched":false}]}"#;

        let data = SaveData::from_bytes(raw).unwrap();

        assert_eq!(data.cards.len(), 2);
        assert!(data.cards.iter().all(|card| !card.is_flipped));
    }

    #[test]
    fn bytes_decode_to_equal_value() {
        let data = sample();
        let bytes = data.to_bytes().unwrap();

        assert_eq!(SaveData::from_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn malformed_bytes_are_rejected() {
        assert!(SaveData::from_bytes(b"{\"rows\":2").is_err());
        assert!(SaveData::from_bytes(b"{\"rows\":-1,\"columns\":2,\"timeLeft\":0,\"currentScore\":0,\"cards\":[]}").is_err());
    }
}
