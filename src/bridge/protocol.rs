//! Bridge wire format.
//!
//! Frames are JSON text tagged by `"type"`:
//!
//! ```text
//! ← { "type": "nfc", "uid": "04A2243F9C", "timestamp": 1700000000000 }
//! ← { "type": "server", "message": "...", "cardSimulationMode": false }
//! → { "type": "simulate-card", "uid": "04A2243F9C" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// One bridge frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BridgeMessage {
    /// A card was read.
    Nfc {
        uid: String,
        /// Bridge wall-clock time in milliseconds.
        timestamp: u64,
    },
    /// Greeting sent on connect.
    Server {
        message: String,
        #[serde(rename = "cardSimulationMode", default)]
        card_simulation_mode: bool,
    },
    /// Ask the bridge to broadcast a fake card read.
    SimulateCard { uid: String },
}

impl BridgeMessage {
    /// Parse a text frame.
    pub fn parse(text: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode as a text frame.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nfc() {
        let msg = BridgeMessage::parse(r#"{"type":"nfc","uid":"04A2243F9C","timestamp":42}"#).unwrap();
        assert_eq!(
            msg,
            BridgeMessage::Nfc {
                uid: "04A2243F9C".to_string(),
                timestamp: 42
            }
        );
    }

    #[test]
    fn test_parse_greeting() {
        let msg = BridgeMessage::parse(
            r#"{"type":"server","message":"Connected to NFC Bridge","cardSimulationMode":true}"#,
        )
        .unwrap();
        assert!(matches!(
            msg,
            BridgeMessage::Server {
                card_simulation_mode: true,
                ..
            }
        ));

        // Older bridges omit the flag
        let msg = BridgeMessage::parse(r#"{"type":"server","message":"hi"}"#).unwrap();
        assert!(matches!(
            msg,
            BridgeMessage::Server {
                card_simulation_mode: false,
                ..
            }
        ));
    }

    #[test]
    fn test_encode_simulate_card() {
        let json = BridgeMessage::SimulateCard {
            uid: "AB".to_string(),
        }
        .to_json()
        .unwrap();
        assert_eq!(json, r#"{"type":"simulate-card","uid":"AB"}"#);
    }

    #[test]
    fn test_malformed_frames() {
        for frame in ["", "not json", r#"{"type":"nfc"}"#, r#"{"type":"eject"}"#, r#"{"uid":"x"}"#] {
            assert!(
                matches!(BridgeMessage::parse(frame), Err(BridgeError::Malformed(_))),
                "{frame} should be rejected"
            );
        }
    }
}
