//! This module handles the initial setup of the application.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::args::AppArgs;
use crate::config::TerminalConfig;
use crate::logging::{self, LogBuffer};

/// Everything the session needs once setup has finished.
pub struct PreparedApp {
    pub config: TerminalConfig,
    /// Resolved directory commands run in.
    pub workdir: PathBuf,
    pub log_buffer: Arc<LogBuffer>,
}

/// Loads the config file, applies command-line overrides, installs logging and
/// resolves the working directory.
pub fn prepare(args: AppArgs) -> Result<PreparedApp> {
    let mut config = match &args.config {
        Some(path) => TerminalConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TerminalConfig::default(),
    };
    apply_args(&mut config, args);

    let log_buffer = logging::init(&config.log_level, config.log_file.as_deref())?;

    let workdir = match &config.workdir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    if !workdir.is_dir() {
        anyhow::bail!("Working directory '{}' does not exist", workdir.display());
    }

    if !config.headless {
        print_start_banner(&config, &workdir);
    }

    Ok(PreparedApp {
        config,
        workdir,
        log_buffer,
    })
}

/// Command-line values win over the config file.
fn apply_args(config: &mut TerminalConfig, args: AppArgs) {
    if let Some(user) = args.user {
        config.prompt.user = user;
    }
    if let Some(host) = args.host {
        config.prompt.host = host;
    }
    if let Some(cwd) = args.cwd {
        config.prompt.cwd = cwd;
    }
    if let Some(workdir) = args.workdir {
        config.workdir = Some(workdir);
    }
    if let Some(shell) = args.shell {
        config.shell = shell;
    }
    if let Some(port) = args.web_port {
        config.web_port = Some(port);
    }
    if args.headless {
        config.headless = true;
    }
    if let Some(scrollback) = args.scrollback {
        config.scrollback = scrollback;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = Some(log_file);
    }
}

fn print_start_banner(config: &TerminalConfig, workdir: &std::path::Path) {
    println!("🚀 Starting agent-term");
    println!("Prompt: {}", config.prompt);
    println!("Working directory: {}", workdir.display());
    if let Some(port) = config.web_port {
        println!("Web transport: http://127.0.0.1:{}", port);
    }
    if let Some(log_file) = &config.log_file {
        println!("Log file: {}", log_file.display());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_override_config_values() {
        let mut config = TerminalConfig {
            shell: "bash".to_string(),
            web_port: Some(3000),
            ..TerminalConfig::default()
        };
        let args = AppArgs {
            user: Some("opendevin".to_string()),
            host: Some("docker-desktop".to_string()),
            web_port: Some(4000),
            headless: true,
            ..AppArgs::default()
        };

        apply_args(&mut config, args);

        assert_eq!(
            config.prompt.to_string(),
            "opendevin@docker-desktop:/workspace $ "
        );
        assert_eq!(config.web_port, Some(4000));
        assert_eq!(config.shell, "bash");
        assert!(config.headless);
    }

    #[test]
    fn absent_args_keep_config_values() {
        let mut config = TerminalConfig {
            log_level: "debug".to_string(),
            scrollback: 50,
            ..TerminalConfig::default()
        };
        apply_args(&mut config, AppArgs::default());
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.scrollback, 50);
        assert!(!config.headless);
    }

    #[test]
    fn cli_flags_parse() {
        use clap::Parser;
        let args = AppArgs::parse_from([
            "agent-term",
            "--user",
            "dev",
            "--web-port",
            "8080",
            "--headless",
        ]);
        assert_eq!(args.user.as_deref(), Some("dev"));
        assert_eq!(args.web_port, Some(8080));
        assert!(args.headless);
    }
}
