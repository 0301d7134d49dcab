//! WebSocket client session management.

use clap::ValueEnum;
use futures_util::{SinkExt, StreamExt};
use onair_server::infrastructure::dto::websocket::OutboundMessage;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{
    command::parse_line, error::ClientError, formatter::MessageFormatter, prompt::PromptInput,
    ui::redisplay_prompt,
};

/// Which side of the relay to connect as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    /// Watch widget events like an overlay would
    Overlay,
    /// Send commands from a prompt
    Control,
}

impl Role {
    pub fn path(&self) -> &'static str {
        match self {
            Role::Overlay => "/overlay",
            Role::Control => "/control",
        }
    }

    pub(crate) fn prompt(&self) -> &'static str {
        match self {
            Role::Overlay => "",
            Role::Control => "control> ",
        }
    }
}

/// Run one WebSocket session until the user exits or the connection drops
///
/// Controllers pass the client's prompt input; overlays pass `None` and only
/// watch.
pub async fn run_client_session(
    base_url: &str,
    role: Role,
    token: Option<&str>,
    input: Option<&mut PromptInput>,
) -> Result<(), ClientError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), role.path());

    let (ws_stream, _response) = connect_async(&url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to {} as {:?}", url, role);
    match role {
        Role::Overlay => println!("\nWatching overlay events. Press Ctrl+C to exit.\n"),
        Role::Control => println!(
            "\nType commands like `ticker {{\"message\":\"hi\"}}`, `state` or `ping`. Press Ctrl+D to exit.\n"
        ),
    }

    let (mut write, mut read) = ws_stream.split();
    let prompt = role.prompt();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<OutboundMessage>(text.as_str()) {
                        Ok(OutboundMessage::Error { message }) if message == "Unauthorized" => {
                            print!("{}", MessageFormatter::format(&OutboundMessage::error(message)));
                            return Err(ClientError::Unauthorized);
                        }
                        Ok(message) => print!("{}", MessageFormatter::format(&message)),
                        Err(_) => print!("{}", MessageFormatter::format_raw_message(text.as_str())),
                    }
                    redisplay_prompt(prompt);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        Err(ClientError::ConnectionError("Connection lost".to_string()))
    });

    let Some(input) = input else {
        return read_task
            .await
            .unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())));
    };

    // Turn prompt lines into commands until the operator closes the prompt
    let send_commands = async move {
        while let Some(line) = input.next_line().await {
            let envelope = match parse_line(&line, token) {
                Ok(envelope) => envelope,
                Err(e) => {
                    println!("{}", e);
                    redisplay_prompt(prompt);
                    continue;
                }
            };

            let json = match serde_json::to_string(&envelope) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize command: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send command: {}", e);
                return Err(ClientError::ConnectionError(e.to_string()));
            }
        }

        let _ = write.send(Message::Close(None)).await;
        Ok(())
    };

    // Whichever side finishes first ends the session
    tokio::select! {
        read_result = &mut read_task => {
            read_result.unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())))
        }
        send_result = send_commands => {
            read_task.abort();
            send_result
        }
    }
}
