//! Message formatting utilities for client display.

use onair_server::{
    domain::{WidgetKind, WidgetRecord, WidgetState},
    infrastructure::dto::websocket::OutboundMessage,
};
use onair_shared::time::timestamp_to_rfc3339;
use serde_json::Value;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any relay message for the terminal
    pub fn format(message: &OutboundMessage) -> String {
        match message {
            OutboundMessage::StateSync { payload } => Self::format_state_sync(payload),
            OutboundMessage::TickerUpdate { payload } => {
                Self::format_widget_update(WidgetKind::Ticker, payload)
            }
            OutboundMessage::PopupUpdate { payload } => {
                Self::format_widget_update(WidgetKind::Popup, payload)
            }
            OutboundMessage::BrbUpdate { payload } => {
                Self::format_widget_update(WidgetKind::Brb, payload)
            }
            OutboundMessage::CountdownUpdate { payload } => {
                Self::format_widget_update(WidgetKind::Countdown, payload)
            }
            OutboundMessage::StatsUpdate { payload } => {
                Self::format_widget_update(WidgetKind::Stats, payload)
            }
            OutboundMessage::PopupTrigger { payload } => Self::format_popup_trigger(payload),
            OutboundMessage::Pong { timestamp } => {
                format!("\npong (server time {})\n", timestamp_to_rfc3339(*timestamp))
            }
            OutboundMessage::Ack { widget } => format!("\nack: {}\n", widget),
            OutboundMessage::Error { message } => format!("\nerror: {}\n", message),
        }
    }

    /// Format the full state snapshot, one line per widget
    pub fn format_state_sync(state: &WidgetState) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Widget state:\n");
        for kind in WidgetKind::ALL {
            let record = state.record(kind);
            output.push_str(&format!(
                "{:<10} [{}] {}\n",
                kind.as_str(),
                Self::active_label(record),
                Self::compact(record)
            ));
        }
        output.push_str("============================================================\n");
        output
    }

    /// Format a `*_UPDATE` event
    pub fn format_widget_update(kind: WidgetKind, record: &WidgetRecord) -> String {
        format!(
            "\n~ {} [{}] {}\n",
            kind,
            Self::active_label(record),
            Self::compact(record)
        )
    }

    /// Format a `POPUP_TRIGGER` pulse
    pub fn format_popup_trigger(payload: &Value) -> String {
        format!("\n! popup triggered {}\n", payload)
    }

    /// Format a frame that is not a known relay message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    fn active_label(record: &WidgetRecord) -> &'static str {
        match record.get("active").and_then(Value::as_bool) {
            Some(true) => "on",
            _ => "off",
        }
    }

    fn compact(record: &WidgetRecord) -> String {
        let mut fields = record.as_map().clone();
        fields.remove("active");
        Value::Object(fields).to_string()
    }
}
