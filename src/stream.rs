//! Streaming response filtering and typewriter rendering.
//!
//! The agent loop produces a finite, one-shot sequence of [`AgentEvent`]
//! records per turn. Only assistant text is user-visible; tool calls,
//! echoed input, and debug traces are filtered out. Retained text is
//! written one character at a time with a configurable delay to give a
//! perceived real-time typing effect.

use crate::error::Result;
use std::io::{self, Write};
use std::time::Duration;

/// One event emitted by the agent while producing a response.
///
/// `Unknown` is the catch-all for event shapes added upstream that this
/// version does not recognize; the renderer skips it silently.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Assistant-generated text, the only kind that gets rendered.
    AssistantText(String),
    /// The model invoked a tool.
    ToolCall { name: String, arguments: String },
    /// The user's own input echoed back through the event stream.
    UserEcho(String),
    /// Internal trace record.
    Debug(String),
    /// Unrecognized event shape; skipped, never an error.
    Unknown,
}

/// Renders assistant text character by character into a sink.
///
/// Configured once with the inter-character delay; each call to
/// [`render`](Typewriter::render) consumes one event sequence.
pub struct Typewriter<W: Write> {
    sink: W,
    delay: Duration,
}

impl Typewriter<io::Stdout> {
    /// Typewriter writing to stdout.
    pub fn stdout(delay: Duration) -> Self {
        Self::new(io::stdout(), delay)
    }
}

impl<W: Write> Typewriter<W> {
    pub fn new(sink: W, delay: Duration) -> Self {
        Self { sink, delay }
    }

    /// Consume an event sequence, rendering assistant text and
    /// discarding everything else. Returns the concatenated text that
    /// was rendered.
    ///
    /// The sink is flushed after every character so the effect is
    /// visible even on line-buffered terminals.
    pub async fn render(&mut self, events: impl IntoIterator<Item = AgentEvent>) -> Result<String> {
        let mut rendered = String::new();

        for event in events {
            match event {
                AgentEvent::AssistantText(text) => {
                    for ch in text.chars() {
                        write!(self.sink, "{}", ch)?;
                        self.sink.flush()?;
                        if !self.delay.is_zero() {
                            tokio::time::sleep(self.delay).await;
                        }
                    }
                    rendered.push_str(&text);
                }
                AgentEvent::ToolCall { .. }
                | AgentEvent::UserEcho(_)
                | AgentEvent::Debug(_)
                | AgentEvent::Unknown => {}
            }
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that records the byte length of every write call, so
    /// tests can assert the per-character write pattern.
    struct RecordingWriter {
        bytes: Vec<u8>,
        write_sizes: Vec<usize>,
    }

    impl RecordingWriter {
        fn new() -> Self {
            Self {
                bytes: Vec::new(),
                write_sizes: Vec::new(),
            }
        }
    }

    impl Write for RecordingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            self.write_sizes.push(buf.len());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sample_events() -> Vec<AgentEvent> {
        vec![
            AgentEvent::Debug("model round 1".to_string()),
            AgentEvent::UserEcho("what is 15 + 7?".to_string()),
            AgentEvent::AssistantText("15 + 7 = 22".to_string()),
            AgentEvent::ToolCall {
                name: "add".to_string(),
                arguments: r#"{"first": 15, "second": 7}"#.to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_only_assistant_text_is_rendered() {
        let mut typewriter = Typewriter::new(RecordingWriter::new(), Duration::ZERO);
        let rendered = typewriter.render(sample_events()).await.unwrap();

        assert_eq!(rendered, "15 + 7 = 22");
        assert_eq!(
            String::from_utf8(typewriter.sink.bytes.clone()).unwrap(),
            "15 + 7 = 22"
        );
    }

    #[tokio::test]
    async fn test_renders_one_character_per_write() {
        let mut typewriter = Typewriter::new(RecordingWriter::new(), Duration::ZERO);
        typewriter
            .render(vec![AgentEvent::AssistantText("abc".to_string())])
            .await
            .unwrap();

        assert_eq!(typewriter.sink.write_sizes, vec![1, 1, 1]);
    }

    #[tokio::test]
    async fn test_unknown_events_are_skipped() {
        let mut typewriter = Typewriter::new(RecordingWriter::new(), Duration::ZERO);
        let rendered = typewriter
            .render(vec![
                AgentEvent::Unknown,
                AgentEvent::AssistantText("ok".to_string()),
                AgentEvent::Unknown,
            ])
            .await
            .unwrap();

        assert_eq!(rendered, "ok");
        assert_eq!(typewriter.sink.bytes, b"ok");
    }

    #[tokio::test]
    async fn test_empty_sequence_renders_nothing() {
        let mut typewriter = Typewriter::new(RecordingWriter::new(), Duration::ZERO);
        let rendered = typewriter.render(Vec::new()).await.unwrap();

        assert!(rendered.is_empty());
        assert!(typewriter.sink.bytes.is_empty());
    }

    #[tokio::test]
    async fn test_multiple_text_events_concatenate() {
        let mut typewriter = Typewriter::new(RecordingWriter::new(), Duration::ZERO);
        let rendered = typewriter
            .render(vec![
                AgentEvent::AssistantText("15 + 7".to_string()),
                AgentEvent::Debug("tool round".to_string()),
                AgentEvent::AssistantText(" = 22".to_string()),
            ])
            .await
            .unwrap();

        assert_eq!(rendered, "15 + 7 = 22");
    }
}
