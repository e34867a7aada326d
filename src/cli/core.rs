//! Shell context, dispatch, and command error types.

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::services::ServiceError,
    currency::{format_amount, CurrencyCode},
    errors::StoreError,
    store::ExpenseStore,
};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Fatal shell failures that abort the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Per-command failures reported back into the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Owns the session state: the seeded store, the app configuration, and the
/// command registry. Consumers reach the store only through this context.
pub struct ShellContext {
    mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) store: ExpenseStore,
    pub(crate) config: Config,
    config_manager: ConfigManager,
    pub(crate) theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;

        Ok(Self {
            mode,
            registry,
            store: ExpenseStore::with_sample_data(),
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn config_path(&self) -> &std::path::Path {
        self.config_manager.path()
    }

    pub(crate) fn currency(&self) -> CurrencyCode {
        CurrencyCode::new(self.config.currency.clone())
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        format_amount(amount, &self.currency())
    }

    /// The reference date used by summaries and reports.
    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn expense_id_at(&self, index: usize) -> Result<Uuid, CommandError> {
        self.store
            .expenses()
            .get(index)
            .map(|expense| expense.id)
            .ok_or_else(|| CommandError::InvalidArguments("expense index out of range".into()))
    }

    pub(crate) fn group_id_at(&self, index: usize) -> Result<Uuid, CommandError> {
        self.store
            .groups()
            .get(index)
            .map(|group| group.id)
            .ok_or_else(|| CommandError::InvalidArguments("group index out of range".into()))
    }

    /// Asks for confirmation in interactive mode; script mode always
    /// proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode != CliMode::Interactive {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(|err| match err {
            CommandError::Io(io) => CliError::Io(io),
            CommandError::Dialoguer(dialoguer::Error::IO(io)) => CliError::Io(io),
            _ => CliError::Io(std::io::Error::other("prompt failed")),
        })
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_context() -> ShellContext {
        let dir = tempfile::tempdir().expect("temp dir");
        std::env::set_var(crate::config::CONFIG_DIR_ENV, dir.path());
        let context = ShellContext::new(CliMode::Script).expect("context builds");
        std::mem::forget(dir);
        context
    }

    #[test]
    fn dispatch_routes_known_commands() {
        let mut context = script_context();
        assert_eq!(context.process_line("groups").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn unknown_commands_keep_the_loop_running() {
        let mut context = script_context();
        let control = context.process_line("definitely-not-a-command").unwrap();
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn mutating_commands_reach_the_store() {
        let mut context = script_context();
        let before = context.store.expenses().len();
        context
            .process_line("expense add Snacks 6.50 Food")
            .unwrap();
        assert_eq!(context.store.expenses().len(), before + 1);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut context = script_context();
        assert_eq!(context.process_line("   ").unwrap(), LoopControl::Continue);
    }
}
