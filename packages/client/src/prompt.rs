//! Operator prompt input.
//!
//! rustyline blocks, so lines are read on one OS thread for the whole life of
//! the client and handed to whichever session is connected at the time.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Lines typed at the controller prompt
pub struct PromptInput {
    lines: mpsc::UnboundedReceiver<String>,
}

impl PromptInput {
    /// Start the prompt thread. Call once per client, not once per connection.
    pub fn spawn(prompt: &'static str) -> Self {
        let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();

        std::thread::spawn(move || {
            let mut editor = match DefaultEditor::new() {
                Ok(editor) => editor,
                Err(e) => {
                    tracing::error!("Could not open the terminal prompt: {}", e);
                    return;
                }
            };

            let lines = std::iter::from_fn(|| {
                let line = editor.readline(prompt);
                if let Ok(line) = &line
                    && !line.trim().is_empty()
                {
                    editor.add_history_entry(line.trim()).ok();
                }
                Some(line)
            });
            forward_lines(lines, &line_tx);
        });

        Self::from_receiver(line_rx)
    }

    fn from_receiver(lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self { lines }
    }

    /// Next non-empty line, or `None` once the operator closed the prompt.
    ///
    /// Cancel safe: a session that is dropped while waiting loses no line.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }
}

/// Forward trimmed, non-empty lines until the prompt closes or nobody listens.
fn forward_lines<I>(lines: I, line_tx: &mpsc::UnboundedSender<String>)
where
    I: IntoIterator<Item = Result<String, ReadlineError>>,
{
    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                tracing::info!("Prompt closed");
                return;
            }
            Err(e) => {
                tracing::error!("Prompt error: {}", e);
                return;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_tx.send(line.to_string()).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_survive_across_sessions() {
        // テスト項目: 再接続をまたいでも同じ入力を使い続け、入力行が失われない
        // given (前提条件):
        let (line_tx, line_rx) = mpsc::unbounded_channel();
        let mut input = PromptInput::from_receiver(line_rx);
        line_tx.send("ping".to_string()).unwrap();

        // when (操作): 1 回目のセッションが 1 行読んだ後、待機中に切断される
        let first = input.next_line().await;
        {
            let pending = input.next_line();
            tokio::select! {
                _ = pending => panic!("no line should be available yet"),
                _ = tokio::task::yield_now() => {}
            }
        }
        line_tx.send("state".to_string()).unwrap();
        let second = input.next_line().await;

        // then (期待する結果): 2 回目のセッションが次の行を受け取る
        assert_eq!(first.as_deref(), Some("ping"));
        assert_eq!(second.as_deref(), Some("state"));
    }

    #[test]
    fn test_forward_lines_skips_blanks_and_stops_on_eof() {
        // テスト項目: 空行は送らず、Ctrl+D 以降の行は送らない
        // given (前提条件):
        let (line_tx, mut line_rx) = mpsc::unbounded_channel();
        let lines = vec![
            Ok("  ticker {\"active\":true}  ".to_string()),
            Ok("   ".to_string()),
            Ok("ping".to_string()),
            Err(ReadlineError::Eof),
            Ok("state".to_string()),
        ];

        // when (操作):
        forward_lines(lines, &line_tx);
        drop(line_tx);

        // then (期待する結果):
        assert_eq!(line_rx.try_recv().unwrap(), "ticker {\"active\":true}");
        assert_eq!(line_rx.try_recv().unwrap(), "ping");
        assert!(line_rx.try_recv().is_err());
    }
}
