//! Ask command implementation.

use crate::agent::Agent;
use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::openai::create_client;
use crate::stream::Typewriter;
use anyhow::Result;

/// Run the ask command: one question, one streamed answer.
pub async fn run_ask(question: &str, model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'regn doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let client = create_client(&settings.llm)?;
    let model = model.unwrap_or_else(|| settings.llm.model.clone());
    let mut agent = Agent::new(client, &model, settings.llm.temperature)?;
    let mut typewriter = Typewriter::stdout(settings.stream.char_delay());

    let spinner = Output::spinner("Thinking...");

    match agent.send(question).await {
        Ok(events) => {
            spinner.finish_and_clear();
            let rendered = typewriter.render(events).await?;
            println!();

            if rendered.is_empty() {
                Output::warning("The model returned an empty response.");
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to process question: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
