//! Cloud function deployment through an external CLI.
//!
//! The CLI (default `tcb`) must already be installed and logged in.
//! Commands issued:
//! - `<cli> fn config update <function> --env K=V ...`
//! - `<cli> fn deploy <function> --force`

use std::process::Command;

use crate::provision::SetupError;

pub const DEFAULT_CLI: &str = "tcb";

#[derive(Debug, Clone)]
pub struct DeployCli {
    program: String,
}

impl DeployCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn config_update_args(function: &str, vars: &[(&str, &str)]) -> Vec<String> {
        let mut args: Vec<String> = ["fn", "config", "update", function]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if !vars.is_empty() {
            args.push("--env".to_string());
            args.extend(vars.iter().map(|(k, v)| format!("{k}={v}")));
        }
        args
    }

    pub fn deploy_args(function: &str) -> Vec<String> {
        ["fn", "deploy", function, "--force"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Push environment variables to the function's configuration.
    pub fn push_config(&self, function: &str, vars: &[(&str, &str)]) -> Result<(), SetupError> {
        self.run("config", &Self::config_update_args(function, vars))
    }

    /// Deploy the function.
    pub fn deploy(&self, function: &str) -> Result<(), SetupError> {
        self.run("deploy", &Self::deploy_args(function))
    }

    fn run(&self, step: &'static str, args: &[String]) -> Result<(), SetupError> {
        tracing::info!(program = %self.program, step, "Running deployment CLI");

        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|e| SetupError::Deployment {
                step,
                reason: format!("could not run `{}`: {e}", self.program),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SetupError::Deployment {
                step,
                reason: match status.code() {
                    Some(code) => format!("`{}` exited with code {code}", self.program),
                    None => format!("`{}` was terminated by a signal", self.program),
                },
            })
        }
    }
}

impl Default for DeployCli {
    fn default() -> Self {
        Self::new(DEFAULT_CLI)
    }
}
