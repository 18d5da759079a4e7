//! Tool definitions and implementations for the math agent.

use crate::error::{RegnError, Result};
use crate::number::{Number, Operand};

/// Available tools for the agent.
#[derive(Debug, Clone)]
pub enum ToolCall {
    /// Add two numbers.
    Add { first: Operand, second: Operand },

    /// Subtract the second number from the first.
    Subtract { first: Operand, second: Operand },
}

impl ToolCall {
    /// Execute the tool call, returning the result formatted for the
    /// model.
    pub fn execute(&self) -> Result<String> {
        match self {
            ToolCall::Add { first, second } => apply("Addition", first, second, |a, b| a + b),
            ToolCall::Subtract { first, second } => {
                apply("Subtraction", first, second, |a, b| a - b)
            }
        }
    }
}

/// Coerce both operands and apply the operator.
///
/// A coercion failure is wrapped in an operation error that carries the
/// original failure as its source; the coercion message already names
/// the offending value.
fn apply(
    operation: &'static str,
    first: &Operand,
    second: &Operand,
    op: fn(Number, Number) -> Number,
) -> Result<String> {
    let wrap = |source: RegnError| RegnError::Operation {
        operation,
        source: Box::new(source),
    };

    let a = first.coerce().map_err(wrap)?;
    let b = second.coerce().map_err(wrap)?;

    Ok(op(a, b).to_string())
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let operand_schema = |description: &str| {
        serde_json::json!({
            "type": ["number", "string"],
            "description": description
        })
    };

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "add".to_string(),
                description: Some(
                    "Add two numbers together. Operands may be numbers or numeric strings \
                    (integer, decimal, scientific notation, or complex like '3+4j')."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "first": operand_schema("The first operand"),
                        "second": operand_schema("The second operand")
                    },
                    "required": ["first", "second"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "subtract".to_string(),
                description: Some(
                    "Subtract the second number from the first. Operands may be numbers or \
                    numeric strings (integer, decimal, scientific notation, or complex like '3+4j')."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "first": operand_schema("The minuend"),
                        "second": operand_schema("The subtrahend")
                    },
                    "required": ["first", "second"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| RegnError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "add" => Ok(ToolCall::Add {
            first: operand_arg(&args, "first")?,
            second: operand_arg(&args, "second")?,
        }),
        "subtract" => Ok(ToolCall::Subtract {
            first: operand_arg(&args, "first")?,
            second: operand_arg(&args, "second")?,
        }),
        _ => Err(RegnError::Agent(format!("Unknown tool: {}", name))),
    }
}

/// Extract a number-or-string operand argument.
fn operand_arg(args: &serde_json::Value, key: &str) -> Result<Operand> {
    let value = args
        .get(key)
        .ok_or_else(|| RegnError::Agent(format!("Missing '{}' argument", key)))?;

    serde_json::from_value(value.clone()).map_err(|_| {
        RegnError::Agent(format!("Argument '{}' must be a number or a string", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_add_tool() {
        let tool = parse_tool_call("add", r#"{"first": 15, "second": "7"}"#).unwrap();
        match tool {
            ToolCall::Add { first, second } => {
                assert!(matches!(first, Operand::Int(15)));
                assert!(matches!(second, Operand::Text(ref s) if s == "7"));
            }
            _ => panic!("Expected Add tool"),
        }
    }

    #[test]
    fn test_parse_subtract_tool() {
        let tool = parse_tool_call("subtract", r#"{"first": 10.5, "second": 3}"#).unwrap();
        assert!(matches!(tool, ToolCall::Subtract { .. }));
    }

    #[test]
    fn test_parse_unknown_tool() {
        let err = parse_tool_call("multiply", r#"{"first": 1, "second": 2}"#).unwrap_err();
        assert!(matches!(err, RegnError::Agent(_)));
    }

    #[test]
    fn test_parse_missing_argument() {
        let err = parse_tool_call("add", r#"{"first": 1}"#).unwrap_err();
        assert!(err.to_string().contains("second"));
    }

    #[test]
    fn test_parse_rejects_non_scalar_operand() {
        let err = parse_tool_call("add", r#"{"first": [1, 2], "second": 3}"#).unwrap_err();
        assert!(matches!(err, RegnError::Agent(_)));
    }

    #[test]
    fn test_add_integers() {
        let tool = ToolCall::Add {
            first: Operand::from(15),
            second: Operand::from(7),
        };
        assert_eq!(tool.execute().unwrap(), "22");
    }

    #[test]
    fn test_add_mixed_text_and_numbers() {
        let tool = ToolCall::Add {
            first: Operand::from("1.5"),
            second: Operand::from(2),
        };
        assert_eq!(tool.execute().unwrap(), "3.5");

        let tool = ToolCall::Add {
            first: Operand::from("10"),
            second: Operand::from("20"),
        };
        assert_eq!(tool.execute().unwrap(), "30");
    }

    #[test]
    fn test_add_complex_text() {
        let tool = ToolCall::Add {
            first: Operand::from("3+4j"),
            second: Operand::from("1+2j"),
        };
        assert_eq!(tool.execute().unwrap(), "4+6j");
    }

    #[test]
    fn test_subtract() {
        let tool = ToolCall::Subtract {
            first: Operand::from("20"),
            second: Operand::from(8),
        };
        assert_eq!(tool.execute().unwrap(), "12");

        let tool = ToolCall::Subtract {
            first: Operand::from(5),
            second: Operand::from(8),
        };
        assert_eq!(tool.execute().unwrap(), "-3");
    }

    #[test]
    fn test_coercion_failure_is_chained() {
        let tool = ToolCall::Add {
            first: Operand::from("abc"),
            second: Operand::from(1),
        };
        let err = tool.execute().unwrap_err();

        assert!(err.to_string().starts_with("Addition failed"));
        assert!(err.to_string().contains("'abc'"));

        let source = err.source().expect("operation error must chain its source");
        assert_eq!(source.to_string(), "Cannot convert 'abc' to a number");
    }

    #[test]
    fn test_subtraction_failure_names_operation() {
        let tool = ToolCall::Subtract {
            first: Operand::from(1),
            second: Operand::from("3.14.15"),
        };
        let err = tool.execute().unwrap_err();
        assert!(err.to_string().starts_with("Subtraction failed"));
    }
}
