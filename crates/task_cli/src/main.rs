use clap::Parser;
use clap::error::ErrorKind;
use std::io;
use task_cli::cli::{Cli, normalize_parse_error};
use task_cli::commands::{Settings, run_command};
use task_cli::confirm::{AssumeYes, Confirm, LineConfirm};
use task_core::AppError;
use task_core::config;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn init_tracing(filter: &str) {
    let (filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("warn"), Some(err)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();

    if let Some(err) = rejected {
        warn!(error = %err, "invalid --log-level, using warn");
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        warn!(error = %err, "ignoring unreadable config file");
    }

    let settings = Settings::new(&cli, loaded.config);
    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(LineConfirm::stdio())
    };
    let mut out = io::stdout();

    run_command(&cli.command, &settings, confirm.as_mut(), &mut out)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(&err));
            std::process::exit(1);
        }
    };

    init_tracing(&cli.log_level);

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
