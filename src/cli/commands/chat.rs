//! Interactive chat command.

use crate::agent::Agent;
use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::error::{RegnError, Result};
use crate::openai::create_client;
use crate::stream::Typewriter;
use console::style;
use std::io::{self, Write};
use tracing::{info, warn};

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'regn doctor' for detailed diagnostics.");
        return Err(e);
    }

    let client = create_client(&settings.llm)?;
    let model = model.unwrap_or_else(|| settings.llm.model.clone());
    let mut agent = Agent::new(client, &model, settings.llm.temperature)?;
    let mut typewriter = Typewriter::stdout(settings.stream.char_delay());

    info!("Math agent initialized with model {}", model);

    println!("\n{}", style("Welcome to Regn!").bold().cyan());
    println!("{}", style("Ask me to add or subtract numbers.").dim());
    println!(
        "{}\n",
        style("Type 'exit' or 'quit' to end the session. Use 'clear' to reset conversation.")
            .dim()
    );

    loop {
        print!("{} ", style("You:").green().bold());
        io::stdout().flush()?;

        let line = tokio::select! {
            line = read_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\n\nExiting Regn. Goodbye!");
                info!("Session interrupted by user");
                break;
            }
        };

        let Some(line) = line else {
            // EOF on stdin
            println!("\nExiting Regn. Goodbye!");
            break;
        };

        let input = line.trim();

        if input.is_empty() {
            Output::warning("Please enter a valid input.");
            continue;
        }

        if is_exit_command(input) {
            println!("Exiting Regn. Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            agent.clear_history();
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        match agent.send(input).await {
            Ok(events) => {
                spinner.finish_and_clear();
                print!("\n{} ", style("Regn:").cyan().bold());
                io::stdout().flush()?;
                typewriter.render(events).await?;
                println!("\n");
            }
            Err(e) => {
                // A failed query ends the turn, not the session
                spinner.finish_and_clear();
                warn!("Agent error: {}", e);
                Output::error(&format!("Agent error: {}. Please try again.", e));
            }
        }
    }

    Ok(())
}

/// Check whether the input ends the session.
fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Read one line from stdin without blocking the runtime, so Ctrl+C
/// can interrupt the prompt. Returns None on EOF.
async fn read_line() -> Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(input)),
            Err(e) => Err(e),
        }
    })
    .await
    .map_err(|e| RegnError::Agent(format!("Input task failed: {}", e)))?
    .map_err(RegnError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("quit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("Quit"));
    }

    #[test]
    fn test_queries_are_not_exit_commands() {
        assert!(!is_exit_command("add 1 and 2"));
        assert!(!is_exit_command("exit the building, then what?"));
        assert!(!is_exit_command(""));
    }
}
