mod config_commands;
mod context;
mod wizard_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use crate::{
    context::{Loaded, Overrides},
    wizard_commands::WizardOptions,
};

#[derive(Parser)]
#[command(name = "autocode", about = "autocode: generate code files from a service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to use instead of the discovered one.
    #[arg(long, global = true, env = "AUTOCODE_CONFIG")]
    config: Option<PathBuf>,

    /// Workspace root to generate into (repeatable; overrides config).
    #[arg(long = "workspace", global = true, value_name = "DIR")]
    workspace: Vec<PathBuf>,

    /// Template file (overrides config).
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Open the generated file with the system handler.
    #[arg(long, global = true, default_value_t = false)]
    open: bool,

    /// Ask whether to resume when a prompt is dismissed.
    #[arg(long, global = true, default_value_t = false)]
    resume_on_dismiss: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the action menu (default when no subcommand is provided).
    Menu,
    /// Run the generate wizard directly.
    Generate,
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            workspace: self.workspace.clone(),
            template: self.template.clone(),
        }
    }

    fn wizard_options(&self) -> WizardOptions {
        WizardOptions {
            open: self.open,
            resume_on_dismiss: self.resume_on_dismiss,
        }
    }
}

/// Initialise tracing. Logs go to stderr so they never mix with prompts.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "autocode starting");

    let overrides = cli.overrides();
    let options = cli.wizard_options();

    match cli.command {
        None | Some(Commands::Menu) => {
            wizard_commands::run_menu(&Loaded::load(&overrides)?, options).await
        },
        Some(Commands::Generate) => {
            wizard_commands::run_generate(&Loaded::load(&overrides)?, options).await
        },
        Some(Commands::Config { action }) => config_commands::handle_config(action, &overrides),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use {super::*, clap::CommandFactory};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu_defaults() {
        let cli = Cli::try_parse_from(["autocode"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.open);
        assert!(!cli.resume_on_dismiss);
        assert!(cli.workspace.is_empty());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "autocode",
            "generate",
            "--workspace",
            "a",
            "--workspace",
            "b",
            "--template",
            "t.java",
            "--open",
            "--resume-on-dismiss",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Generate)));
        assert_eq!(cli.workspace, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cli.template, Some(PathBuf::from("t.java")));
        let options = cli.wizard_options();
        assert!(options.open && options.resume_on_dismiss);
    }

    #[test]
    fn config_subcommands_parse() {
        let cli = Cli::try_parse_from(["autocode", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: config_commands::ConfigAction::Init { force: true }
            })
        ));
        for action in ["show", "check"] {
            assert!(Cli::try_parse_from(["autocode", "config", action]).is_ok());
        }
        assert!(Cli::try_parse_from(["autocode", "config", "edit"]).is_err());
    }
}
