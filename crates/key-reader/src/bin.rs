use anyhow::Result;
use clap::Parser;
use key_reader::cli::Cli;
use key_reader::config::Config;
use key_reader::session::{Session, SessionConfig, SessionEnd};
use key_reader::shutdown::ShutdownToken;
use key_reader::signals::SignalGuard;
use key_reader::tty::{RawModeGuard, TtySource};
use std::io::{self, Write};
use std::process::{self, ExitCode};

fn init_logging(level: Option<log::LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp_millis().init();
}

fn run(cli: &Cli) -> Result<SessionEnd> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    if cli.continuous {
        config.continuous = true;
    }
    let table = config.key_table()?;
    log::debug!("{} key sequences known", table.len());

    let shutdown = ShutdownToken::new();
    let _signals = SignalGuard::register(&shutdown)?;
    let mut source = TtySource::stdin(config.escape_timeout_ms)?;
    let mut stdout = io::stdout().lock();

    if config.continuous {
        writeln!(stdout)?;
        writeln!(
            stdout,
            "To terminate this program type \"exit\" or \"quit\" in this window"
        )?;
        writeln!(stdout, "or \"kill {}\" in another window", process::id())?;
        writeln!(stdout)?;
    }

    let _raw_mode = RawModeGuard::enable()?;
    let mut session = Session::new(
        &table,
        SessionConfig {
            continuous: config.continuous,
        },
        shutdown,
    );
    session.run(&mut source, &mut stdout)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(&cli) {
        Ok(SessionEnd::UnexpectedUnit(_)) => ExitCode::from(1),
        Ok(end) => {
            log::info!("session ended: {end:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("key-reader: {e:#}");
            ExitCode::from(1)
        }
    }
}
