//! Widget state document: one record per on-air widget kind.
//!
//! Records are plain JSON objects. Updates are shallow merges: keys present in
//! the patch replace the stored ones, every other key is left untouched.
//! Values are accepted as-is; no type or range checks happen here.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// The five fixed widget kinds tracked by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Ticker,
    Popup,
    Brb,
    Countdown,
    Stats,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::Ticker,
        WidgetKind::Popup,
        WidgetKind::Brb,
        WidgetKind::Countdown,
        WidgetKind::Stats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Ticker => "ticker",
            WidgetKind::Popup => "popup",
            WidgetKind::Brb => "brb",
            WidgetKind::Countdown => "countdown",
            WidgetKind::Stats => "stats",
        }
    }

    /// Initial record for this kind, as loaded at process start.
    pub fn default_record(&self) -> WidgetRecord {
        let value = match self {
            WidgetKind::Ticker => json!({
                "active": false,
                "message": "",
                "speed": 50,
                "fontSize": 24,
                "fontWeight": 600,
                "color": "#ffffff",
            }),
            WidgetKind::Popup => json!({
                "active": false,
                "title": "",
                "message": "",
                "icon": null,
                "duration": 5000,
            }),
            WidgetKind::Brb => json!({
                "active": false,
                "message": "Be Right Back",
                "subtitle": "",
                "estimatedTime": null,
            }),
            WidgetKind::Countdown => json!({
                "active": false,
                "label": "Starting Soon",
                "targetTime": null,
            }),
            WidgetKind::Stats => json!({
                "active": false,
                "metrics": [],
            }),
        };
        match value {
            Value::Object(map) => WidgetRecord(map),
            _ => WidgetRecord::default(),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One widget's sub-record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetRecord(Map<String, Value>);

impl WidgetRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Shallow merge: every key of `patch` overwrites the stored value.
    pub fn merge(&mut self, patch: WidgetPatch) {
        for (key, value) in patch.0 {
            self.0.insert(key, value);
        }
    }
}

/// A partial update for a single widget record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetPatch(Map<String, Value>);

/// The payload of an update was present but was not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("widget patch must be a JSON object")]
pub struct InvalidPatch;

impl WidgetPatch {
    /// Build a patch from an optional command payload.
    ///
    /// A missing or `null` payload is an empty patch.
    pub fn from_payload(payload: Option<Value>) -> Result<Self, InvalidPatch> {
        match payload {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map)),
            Some(_) => Err(InvalidPatch),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for WidgetPatch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The full shared document. Every sub-record always exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    pub ticker: WidgetRecord,
    pub popup: WidgetRecord,
    pub brb: WidgetRecord,
    pub countdown: WidgetRecord,
    pub stats: WidgetRecord,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            ticker: WidgetKind::Ticker.default_record(),
            popup: WidgetKind::Popup.default_record(),
            brb: WidgetKind::Brb.default_record(),
            countdown: WidgetKind::Countdown.default_record(),
            stats: WidgetKind::Stats.default_record(),
        }
    }
}

impl WidgetState {
    pub fn record(&self, kind: WidgetKind) -> &WidgetRecord {
        match kind {
            WidgetKind::Ticker => &self.ticker,
            WidgetKind::Popup => &self.popup,
            WidgetKind::Brb => &self.brb,
            WidgetKind::Countdown => &self.countdown,
            WidgetKind::Stats => &self.stats,
        }
    }

    fn record_mut(&mut self, kind: WidgetKind) -> &mut WidgetRecord {
        match kind {
            WidgetKind::Ticker => &mut self.ticker,
            WidgetKind::Popup => &mut self.popup,
            WidgetKind::Brb => &mut self.brb,
            WidgetKind::Countdown => &mut self.countdown,
            WidgetKind::Stats => &mut self.stats,
        }
    }

    /// Merge `patch` into the record for `kind` and return the merged record.
    pub fn merge(&mut self, kind: WidgetKind, patch: WidgetPatch) -> &WidgetRecord {
        let record = self.record_mut(kind);
        record.merge(patch);
        record
    }
}
