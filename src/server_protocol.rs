use serde_json::Value;

use crate::types::Direction;

/// Client messages the websocket layer understands. Anything that fails to
/// parse is dropped silently; the server never answers malformed input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedClientMessage {
    Hello { name: String },
    Input { dir: Direction },
    Pause,
    Reset,
    Ping { t: f64 },
}

pub fn parse_client_message(raw: &str) -> Option<ParsedClientMessage> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let kind = value.get("type")?.as_str()?;
    match kind {
        "hello" => {
            let name = value.get("name").and_then(|v| v.as_str()).unwrap_or("");
            Some(ParsedClientMessage::Hello {
                name: name.trim().chars().take(24).collect(),
            })
        }
        "input" => {
            let dir = value.get("dir")?.as_str()?;
            Some(ParsedClientMessage::Input {
                dir: Direction::parse_move(dir)?,
            })
        }
        "pause" => Some(ParsedClientMessage::Pause),
        "reset" => Some(ParsedClientMessage::Reset),
        "ping" => {
            let t = value.get("t")?.as_f64()?;
            Some(ParsedClientMessage::Ping { t })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hello_with_a_trimmed_name() {
        let msg = parse_client_message(r#"{"type":"hello","name":"  ada "}"#);
        assert_eq!(
            msg,
            Some(ParsedClientMessage::Hello {
                name: "ada".to_string()
            })
        );
    }

    #[test]
    fn hello_without_a_name_defaults_to_empty() {
        let msg = parse_client_message(r#"{"type":"hello"}"#);
        assert_eq!(
            msg,
            Some(ParsedClientMessage::Hello {
                name: String::new()
            })
        );
    }

    #[test]
    fn parses_all_four_input_directions() {
        for (raw, dir) in [
            ("up", Direction::Up),
            ("down", Direction::Down),
            ("left", Direction::Left),
            ("right", Direction::Right),
        ] {
            let msg = parse_client_message(&format!(r#"{{"type":"input","dir":"{raw}"}}"#));
            assert_eq!(msg, Some(ParsedClientMessage::Input { dir }));
        }
    }

    #[test]
    fn rejects_unknown_directions_and_types() {
        assert_eq!(
            parse_client_message(r#"{"type":"input","dir":"diagonal"}"#),
            None
        );
        assert_eq!(parse_client_message(r#"{"type":"warp"}"#), None);
        assert_eq!(parse_client_message("not json"), None);
    }

    #[test]
    fn parses_pause_reset_and_ping() {
        assert_eq!(
            parse_client_message(r#"{"type":"pause"}"#),
            Some(ParsedClientMessage::Pause)
        );
        assert_eq!(
            parse_client_message(r#"{"type":"reset"}"#),
            Some(ParsedClientMessage::Reset)
        );
        assert_eq!(
            parse_client_message(r#"{"type":"ping","t":12.5}"#),
            Some(ParsedClientMessage::Ping { t: 12.5 })
        );
    }
}
