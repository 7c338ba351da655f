//! Protocol messages for WebSocket communication

use serde::Serialize;
use uuid::Uuid;

use crate::game::direction::Direction;
use crate::game::location::Grid;
use crate::game::session::{EndCause, GameSnapshot};

/// Messages sent from client to server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMessage {
    /// Start button
    Start,
    /// Restart button
    Reset,
    /// Arrow key
    Direction(Direction),
    /// Keep-alive, no response
    Ping,
}

impl ClientMessage {
    /// Parse a client message from a text frame
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(dir) = Direction::from_str(s) {
            return Some(ClientMessage::Direction(dir));
        }

        match s.to_lowercase().as_str() {
            "start" => Some(ClientMessage::Start),
            "reset" | "restart" => Some(ClientMessage::Reset),
            "ping" => Some(ClientMessage::Ping),
            _ => None,
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// First message on a new connection
    Hello {
        session: Uuid,
        grid: Grid,
        high_score: u32,
    },
    /// Drawable state, sent every tick and after start/reset
    Update {
        #[serde(flatten)]
        state: GameSnapshot,
    },
    /// The game ended; the client should offer a restart
    Over {
        cause: EndCause,
        score: u32,
        high_score: u32,
    },
}

impl ServerMessage {
    /// Serialize message to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSession;

    #[test]
    fn test_parse_direction() {
        assert_eq!(
            ClientMessage::parse("ArrowUp"),
            Some(ClientMessage::Direction(Direction::Up))
        );
        assert_eq!(
            ClientMessage::parse(" left "),
            Some(ClientMessage::Direction(Direction::Left))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ClientMessage::parse("start"), Some(ClientMessage::Start));
        assert_eq!(ClientMessage::parse("RESET"), Some(ClientMessage::Reset));
        assert_eq!(ClientMessage::parse("ping"), Some(ClientMessage::Ping));
        assert_eq!(ClientMessage::parse("jump"), None);
    }

    #[test]
    fn test_over_json() {
        let msg = ServerMessage::Over {
            cause: EndCause::SelfBite,
            score: 40,
            high_score: 50,
        };
        assert_eq!(
            msg.to_json(),
            r#"{"type":"over","cause":"self","score":40,"high_score":50}"#
        );
    }

    #[test]
    fn test_update_json_is_flat() {
        let session = GameSession::new(7);
        let json: serde_json::Value =
            serde_json::from_str(&ServerMessage::Update { state: session.snapshot() }.to_json()).unwrap();

        assert_eq!(json["type"], "update");
        assert_eq!(json["phase"], "not_started");
        assert_eq!(json["snake"][0]["x"], 125);
        assert_eq!(json["food"], serde_json::Value::Null);
        assert_eq!(json["high_score"], 7);
        assert_eq!(json["grid"]["cols"], 20);
    }
}
