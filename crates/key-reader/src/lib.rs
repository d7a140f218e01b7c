pub mod classifier;
pub mod cli;
pub mod config;
pub mod escape_sequences;
pub mod exit_phrase;
pub mod key_table;
pub mod matcher;
pub mod notation;
pub mod session;
pub mod shutdown;
pub mod signals;
pub mod timing;
pub mod tty;
pub mod window;
