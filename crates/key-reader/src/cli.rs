use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "key-reader",
    version,
    about = "Shows the bytes a terminal sends for each keypress, with timing and key names"
)]
pub struct Cli {
    /// Keep reading keys until "exit" or "quit" is typed
    #[arg(short = 'c', long = "continuous")]
    pub continuous: bool,

    /// Diagnostic log verbosity, 0 to 10 (default: RUST_LOG, else warnings only)
    #[arg(
        short = 'd',
        long = "debug-level",
        value_parser = clap::value_parser!(u8).range(0..=10)
    )]
    pub debug_level: Option<u8>,

    /// Config file (default: <config dir>/key-reader/config.toml)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> Option<LevelFilter> {
        self.debug_level.map(|level| match level {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags() {
        let cli = Cli::try_parse_from(["key-reader"]).unwrap();
        assert!(!cli.continuous);
        assert_eq!(cli.log_level(), None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["key-reader", "-c", "-d", "3"]).unwrap();
        assert!(cli.continuous);
        assert_eq!(cli.log_level(), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "key-reader",
            "--continuous",
            "--debug-level=10",
            "--config",
            "/tmp/keys.toml",
        ])
        .unwrap();
        assert!(cli.continuous);
        assert_eq!(cli.log_level(), Some(LevelFilter::Trace));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/keys.toml")));
    }

    #[test]
    fn test_debug_level_out_of_range() {
        assert!(Cli::try_parse_from(["key-reader", "-d", "11"]).is_err());
        assert!(Cli::try_parse_from(["key-reader", "-d", "x"]).is_err());
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Cli::try_parse_from(["key-reader", "extra"]).is_err());
    }
}
