//! Doctor command - verify configuration and environment.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Regn Doctor");
    println!();
    println!("Checking configuration and environment...\n");

    let checks = vec![check_config_file(), check_api_key(settings)];

    for check in &checks {
        check.print();
    }

    println!("\n{}", style("Settings").bold());
    Output::kv("model", &settings.llm.model);
    Output::kv("base_url", &settings.llm.base_url);
    Output::kv(
        "char_delay_ms",
        &settings.stream.char_delay_ms.to_string(),
    );

    let errors = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count();

    println!();
    if errors == 0 {
        Output::success("All checks passed. Run 'regn chat' to start a session.");
    } else {
        Output::error(&format!("{} check(s) failed.", errors));
    }

    Ok(())
}

fn check_config_file() -> CheckResult {
    let path = Settings::default_config_path();
    if path.exists() {
        CheckResult::ok("config file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "config file",
            "not found, using defaults",
            &format!("Create one at {}", path.display()),
        )
    }
}

fn check_api_key(settings: &Settings) -> CheckResult {
    let env_var = &settings.llm.api_key_env;
    match std::env::var(env_var) {
        Ok(key) if !key.is_empty() => CheckResult::ok(env_var, "set"),
        _ => CheckResult::error(
            env_var,
            "not set",
            &format!("export {}='sk-...'", env_var),
        ),
    }
}
