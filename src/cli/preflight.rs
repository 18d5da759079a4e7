//! Pre-flight checks before talking to the model.
//!
//! Validates that required configuration is present before starting a
//! session that would otherwise fail on the first request.

use crate::config::Settings;
use crate::error::{RegnError, Result};

/// Run pre-flight checks for a chat or ask session.
///
/// Returns Ok(()) if all checks pass, or an error describing what's
/// missing.
pub fn check(settings: &Settings) -> Result<()> {
    check_api_key(&settings.llm.api_key_env)
}

/// Check that the configured API key variable is set and non-empty.
fn check_api_key(env_var: &str) -> Result<()> {
    match std::env::var(env_var) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(RegnError::Config(format!(
            "{} is empty. Set it with: export {}='sk-...'",
            env_var, env_var
        ))),
        Err(_) => Err(RegnError::Config(format!(
            "{} not set. Set it with: export {}='sk-...'",
            env_var, env_var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fails_for_unset_variable() {
        let err = check_api_key("REGN_PREFLIGHT_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("not set"));
    }
}
