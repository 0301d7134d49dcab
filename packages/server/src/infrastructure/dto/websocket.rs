//! WebSocket message DTOs.
//!
//! Every frame is a JSON text frame. Inbound frames are command envelopes,
//! outbound frames are tagged by their `type` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{WidgetKind, WidgetRecord, WidgetState};

/// Messages the relay sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    StateSync { payload: WidgetState },
    TickerUpdate { payload: WidgetRecord },
    PopupUpdate { payload: WidgetRecord },
    BrbUpdate { payload: WidgetRecord },
    CountdownUpdate { payload: WidgetRecord },
    StatsUpdate { payload: WidgetRecord },
    PopupTrigger { payload: Value },
    Pong { timestamp: i64 },
    Ack { widget: WidgetKind },
    Error { message: String },
}

impl OutboundMessage {
    /// The `*_UPDATE` event announcing a merged record.
    pub fn widget_update(kind: WidgetKind, payload: WidgetRecord) -> Self {
        match kind {
            WidgetKind::Ticker => OutboundMessage::TickerUpdate { payload },
            WidgetKind::Popup => OutboundMessage::PopupUpdate { payload },
            WidgetKind::Brb => OutboundMessage::BrbUpdate { payload },
            WidgetKind::Countdown => OutboundMessage::CountdownUpdate { payload },
            WidgetKind::Stats => OutboundMessage::StatsUpdate { payload },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        OutboundMessage::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Command envelope as sent by clients: `{type, payload?, token?}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CommandEnvelope {
    pub fn new(r#type: impl Into<String>, payload: Option<Value>, token: Option<String>) -> Self {
        Self {
            r#type: Some(r#type.into()),
            payload,
            token,
        }
    }

    /// Parse an inbound text frame.
    ///
    /// Only syntactically invalid JSON is an error. Valid JSON of any other
    /// shape yields an envelope whose missing or non-string fields are `None`,
    /// and a `null` payload counts as absent.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut fields) = value else {
            return Ok(Self::default());
        };

        let string_field = |value: Option<Value>| match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Ok(Self {
            r#type: string_field(fields.remove("type")),
            payload: fields.remove("payload").filter(|p| !p.is_null()),
            token: string_field(fields.remove("token")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_type_tags() {
        // テスト項目: 送信メッセージの type が仕様どおりの文字列になる
        // given (前提条件):
        let record = WidgetKind::Ticker.default_record();
        let cases = [
            (
                OutboundMessage::StateSync {
                    payload: WidgetState::default(),
                },
                "STATE_SYNC",
            ),
            (
                OutboundMessage::widget_update(WidgetKind::Ticker, record.clone()),
                "TICKER_UPDATE",
            ),
            (
                OutboundMessage::widget_update(WidgetKind::Popup, record.clone()),
                "POPUP_UPDATE",
            ),
            (
                OutboundMessage::widget_update(WidgetKind::Brb, record.clone()),
                "BRB_UPDATE",
            ),
            (
                OutboundMessage::widget_update(WidgetKind::Countdown, record.clone()),
                "COUNTDOWN_UPDATE",
            ),
            (
                OutboundMessage::widget_update(WidgetKind::Stats, record),
                "STATS_UPDATE",
            ),
            (
                OutboundMessage::PopupTrigger { payload: json!({}) },
                "POPUP_TRIGGER",
            ),
            (OutboundMessage::Pong { timestamp: 1 }, "PONG"),
            (
                OutboundMessage::Ack {
                    widget: WidgetKind::Countdown,
                },
                "ACK",
            ),
            (OutboundMessage::error("boom"), "ERROR"),
        ];

        for (message, expected) in cases {
            // when (操作):
            let value = serde_json::to_value(&message).unwrap();

            // then (期待する結果):
            assert_eq!(value["type"], json!(expected));
        }
    }

    #[test]
    fn test_ack_and_error_shapes() {
        // テスト項目: ACK と ERROR のフィールドが正しく出力される
        // given (前提条件):
        let ack = OutboundMessage::Ack {
            widget: WidgetKind::Brb,
        };
        let error = OutboundMessage::error("Unauthorized");

        // when (操作):
        let ack_json = serde_json::to_value(&ack).unwrap();
        let error_json = serde_json::to_value(&error).unwrap();

        // then (期待する結果):
        assert_eq!(ack_json, json!({"type": "ACK", "widget": "brb"}));
        assert_eq!(
            error_json,
            json!({"type": "ERROR", "message": "Unauthorized"})
        );
    }

    #[test]
    fn test_state_sync_round_trips_for_clients() {
        // テスト項目: クライアント側で STATE_SYNC を読み戻せる
        // given (前提条件):
        let message = OutboundMessage::StateSync {
            payload: WidgetState::default(),
        };
        let text = message.to_json().unwrap();

        // when (操作):
        let parsed: OutboundMessage = serde_json::from_str(&text).unwrap();

        // then (期待する結果):
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_parse_full_envelope() {
        // テスト項目: type / payload / token が全て読み取れる
        // given (前提条件):
        let text = r#"{"type":"UPDATE_TICKER","payload":{"message":"hi"},"token":"t"}"#;

        // when (操作):
        let envelope = CommandEnvelope::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(envelope.r#type.as_deref(), Some("UPDATE_TICKER"));
        assert_eq!(envelope.payload, Some(json!({"message": "hi"})));
        assert_eq!(envelope.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        // テスト項目: JSON として不正な文字列はエラーになる
        // given (前提条件):
        let text = "not json {";

        // when (操作):
        let result = CommandEnvelope::parse(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_tolerates_odd_shapes() {
        // テスト項目: オブジェクト以外や型違いのフィールドは None として扱われる
        // given (前提条件):
        let cases = [
            "42",
            "[1,2,3]",
            r#""PING""#,
            r#"{"type":7,"token":123,"payload":null}"#,
            "{}",
        ];

        for text in cases {
            // when (操作):
            let envelope = CommandEnvelope::parse(text).unwrap();

            // then (期待する結果):
            assert_eq!(envelope, CommandEnvelope::default(), "input: {}", text);
        }
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        // テスト項目: クライアントが送る封筒は None のフィールドを出力しない
        // given (前提条件):
        let envelope = CommandEnvelope::new("PING", None, None);

        // when (操作):
        let text = serde_json::to_string(&envelope).unwrap();

        // then (期待する結果):
        assert_eq!(text, r#"{"type":"PING"}"#);
    }
}
