//! Regn - a conversational math agent
//!
//! A CLI agent that answers arithmetic questions by delegating
//! reasoning to an OpenAI-compatible chat model and executing two
//! registered tools, `add` and `subtract`.
//!
//! The name "Regn" comes from the Norwegian verb "regne," to calculate.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `number` - Numeric coercion and promoting arithmetic
//! - `agent` - The model-driven loop and its registered tools
//! - `stream` - Event filtering and typewriter rendering
//! - `openai` - Chat client construction
//! - `cli` - Command-line surface
//!
//! # Example
//!
//! ```rust,no_run
//! use regn::agent::Agent;
//! use regn::config::Settings;
//! use regn::openai::create_client;
//! use regn::stream::Typewriter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let client = create_client(&settings.llm)?;
//!     let mut agent = Agent::new(client, &settings.llm.model, settings.llm.temperature)?;
//!
//!     let events = agent.send("What is 15 + 7?").await?;
//!     let mut typewriter = Typewriter::stdout(settings.stream.char_delay());
//!     typewriter.render(events).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod number;
pub mod openai;
pub mod stream;

pub use error::{RegnError, Result};
