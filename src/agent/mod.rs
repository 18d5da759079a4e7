//! Agent system: the model-driven loop and its registered tools.
//!
//! The model decides when to invoke the `add` and `subtract` tools;
//! the loop executes them and feeds results back until the model
//! produces a final text answer.

mod runner;
mod tools;

pub use runner::Agent;
pub use tools::{parse_tool_call, tool_definitions, ToolCall};
