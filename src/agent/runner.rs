//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions};
use crate::error::{RegnError, Result};
use crate::stream::AgentEvent;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use tracing::{debug, info};

/// System prompt for the math agent.
const SYSTEM_PROMPT: &str = r#"You are a helpful math assistant.

You have two tools: 'add' and 'subtract'. Always use them to compute results
instead of doing arithmetic yourself. Operands may be integers, decimals,
scientific notation, or complex numbers like '3+4j'; pass them through as-is.

Answer with the computed result in a short, friendly sentence. If a tool
reports that a value could not be converted to a number, explain the problem
to the user instead of guessing."#;

/// Maximum messages kept in history before trimming.
const MAX_HISTORY_MESSAGES: usize = 30;

/// Conversational agent that lets the model drive the arithmetic tools.
///
/// Each call to [`send`](Agent::send) runs one full turn: the model is
/// called in a loop, tool calls are executed and fed back, and the
/// turn's activity is returned as an event sequence for the
/// [`Typewriter`](crate::stream::Typewriter) to filter and render.
pub struct Agent {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    messages: Vec<ChatCompletionRequestMessage>,
    max_tool_iterations: usize,
}

impl Agent {
    /// Create a new agent with a pinned system prompt.
    pub fn new(client: Client<OpenAIConfig>, model: &str, temperature: f32) -> Result<Self> {
        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()
            .map_err(|e| RegnError::Agent(e.to_string()))?;

        Ok(Self {
            client,
            model: model.to_string(),
            temperature,
            messages: vec![system_message.into()],
            max_tool_iterations: 10,
        })
    }

    /// Set maximum tool iterations per turn.
    pub fn with_max_tool_iterations(mut self, max: usize) -> Self {
        self.max_tool_iterations = max;
        self
    }

    /// Clear conversation history (keeps system prompt).
    pub fn clear_history(&mut self) {
        self.messages.truncate(1);
    }

    /// Run one conversational turn and return its event sequence.
    ///
    /// The sequence is heterogeneous on purpose: it carries the echoed
    /// user input, debug traces, and tool invocations alongside the
    /// assistant text, and the stream filter decides what the user sees.
    pub async fn send(&mut self, user_input: &str) -> Result<Vec<AgentEvent>> {
        let mut events = vec![AgentEvent::UserEcho(user_input.to_string())];

        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(user_input)
            .build()
            .map_err(|e| RegnError::Agent(e.to_string()))?;
        self.messages.push(user_message.into());

        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > self.max_tool_iterations {
                return Err(RegnError::Agent(format!(
                    "Agent exceeded maximum tool iterations ({})",
                    self.max_tool_iterations
                )));
            }

            debug!("Agent iteration {}, {} messages", iterations, self.messages.len());
            events.push(AgentEvent::Debug(format!("model round {}", iterations)));

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .temperature(self.temperature)
                .messages(self.messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| RegnError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| RegnError::OpenAI(format!("Chat API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| RegnError::Agent("No response from model".to_string()))?;

            match &choice.message.tool_calls {
                Some(tool_calls) if !tool_calls.is_empty() => {
                    // Add assistant message with tool calls to history
                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()
                        .map_err(|e| RegnError::Agent(e.to_string()))?;
                    self.messages.push(assistant_msg.into());

                    for tool_call in tool_calls {
                        let name = &tool_call.function.name;
                        let arguments = &tool_call.function.arguments;

                        info!("Agent calling tool: {} with args: {}", name, arguments);
                        events.push(AgentEvent::ToolCall {
                            name: name.clone(),
                            arguments: arguments.clone(),
                        });

                        // Tool failures go back to the model as tool
                        // output; it decides how to present them.
                        let result = match parse_tool_call(name, arguments) {
                            Ok(tool) => match tool.execute() {
                                Ok(output) => output,
                                Err(e) => format!("Tool error: {}", e),
                            },
                            Err(e) => format!("Failed to parse tool call: {}", e),
                        };

                        let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(&tool_call.id)
                            .content(result)
                            .build()
                            .map_err(|e| RegnError::Agent(e.to_string()))?;
                        self.messages.push(tool_msg.into());
                    }
                }
                _ => {
                    // No tool calls - final response
                    let content = choice.message.content.clone().unwrap_or_default();

                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .content(content.clone())
                        .build()
                        .map_err(|e| RegnError::Agent(e.to_string()))?;
                    self.messages.push(assistant_msg.into());

                    self.trim_history(MAX_HISTORY_MESSAGES);

                    events.push(AgentEvent::AssistantText(content));
                    return Ok(events);
                }
            }
        }
    }

    /// Trim conversation history, keeping the system message and the
    /// most recent exchanges.
    fn trim_history(&mut self, max_messages: usize) {
        if self.messages.len() > max_messages {
            let start = self.messages.len() - (max_messages - 1);
            let mut trimmed = vec![self.messages[0].clone()];
            trimmed.extend(self.messages[start..].iter().cloned());
            self.messages = trimmed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::create_client_for_base;

    fn test_agent() -> Agent {
        let client = create_client_for_base("http://localhost:1", "test-key");
        Agent::new(client, "test-model", 0.0).unwrap()
    }

    #[test]
    fn test_new_agent_pins_system_prompt() {
        let agent = test_agent();
        assert_eq!(agent.messages.len(), 1);
    }

    #[test]
    fn test_clear_history_keeps_system_prompt() {
        let mut agent = test_agent();
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content("hello")
            .build()
            .unwrap();
        agent.messages.push(user_message.into());

        agent.clear_history();
        assert_eq!(agent.messages.len(), 1);
    }

    #[test]
    fn test_trim_history_keeps_recent_messages() {
        let mut agent = test_agent();
        for i in 0..50 {
            let msg = ChatCompletionRequestUserMessageArgs::default()
                .content(format!("message {}", i))
                .build()
                .unwrap();
            agent.messages.push(msg.into());
        }

        agent.trim_history(10);
        assert_eq!(agent.messages.len(), 10);
        // System message survives at index 0
        assert!(matches!(
            agent.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
    }
}
