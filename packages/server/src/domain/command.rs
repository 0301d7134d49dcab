//! Inbound command vocabulary.

use std::str::FromStr;

/// Every command the relay understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    Ping,
    UpdateTicker,
    UpdatePopup,
    UpdateBrb,
    UpdateCountdown,
    UpdateStats,
    TriggerPopup,
    GetState,
}

/// The `type` field named no known command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command type '{0}'")]
pub struct UnknownCommandType(pub String);

impl CommandType {
    pub const ALL: [CommandType; 8] = [
        CommandType::Ping,
        CommandType::UpdateTicker,
        CommandType::UpdatePopup,
        CommandType::UpdateBrb,
        CommandType::UpdateCountdown,
        CommandType::UpdateStats,
        CommandType::TriggerPopup,
        CommandType::GetState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Ping => "PING",
            CommandType::UpdateTicker => "UPDATE_TICKER",
            CommandType::UpdatePopup => "UPDATE_POPUP",
            CommandType::UpdateBrb => "UPDATE_BRB",
            CommandType::UpdateCountdown => "UPDATE_COUNTDOWN",
            CommandType::UpdateStats => "UPDATE_STATS",
            CommandType::TriggerPopup => "TRIGGER_POPUP",
            CommandType::GetState => "GET_STATE",
        }
    }
}

impl FromStr for CommandType {
    type Err = UnknownCommandType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandType::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| UnknownCommandType(s.to_string()))
    }
}
