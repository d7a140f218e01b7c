use crate::classifier::ByteInfo;
use crate::exit_phrase::ExitPhraseDetector;
use crate::key_table::KeyNameTable;
use crate::matcher::SequenceMatcher;
use crate::shutdown::{ShutdownToken, signal_name};
use crate::timing::{Clock, SystemClock, TimingTracker};
use anyhow::Result;
use std::io::Write;

/// One unit delivered by a [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Unit(u32),
    EndOfStream,
    /// The read returned early because a signal arrived. Nothing was consumed.
    Interrupted,
}

pub trait ByteSource {
    /// A non-blocking read may give up and return [`Input::EndOfStream`].
    fn next_unit(&mut self, blocking: bool) -> Result<Input>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    EndOfStream,
    ExitPhrase,
    Shutdown { signal: Option<i32> },
    UnexpectedUnit(u32),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Keep blocking for input after the first keystroke instead of ending on a pause.
    pub continuous: bool,
}

pub struct Session<'t, T: KeyNameTable + ?Sized, C: Clock = SystemClock> {
    table: &'t T,
    clock: C,
    config: SessionConfig,
    shutdown: ShutdownToken,
    timing: TimingTracker,
    matcher: SequenceMatcher,
    exit_phrase: ExitPhraseDetector,
}

impl<'t, T: KeyNameTable + ?Sized> Session<'t, T, SystemClock> {
    pub fn new(table: &'t T, config: SessionConfig, shutdown: ShutdownToken) -> Self {
        Self::with_clock(table, config, shutdown, SystemClock)
    }
}

impl<'t, T: KeyNameTable + ?Sized, C: Clock> Session<'t, T, C> {
    pub fn with_clock(
        table: &'t T,
        config: SessionConfig,
        shutdown: ShutdownToken,
        clock: C,
    ) -> Self {
        Self {
            table,
            clock,
            config,
            shutdown,
            timing: TimingTracker::new(),
            matcher: SequenceMatcher::new(),
            exit_phrase: ExitPhraseDetector::new(),
        }
    }

    pub fn run<S, W>(&mut self, source: &mut S, out: &mut W) -> Result<SessionEnd>
    where
        S: ByteSource + ?Sized,
        W: Write + ?Sized,
    {
        write!(out, "Press a key\n\n")?;
        out.flush()?;

        loop {
            self.report_signals(out)?;
            if !self.shutdown.is_running() {
                let signal = self.shutdown.stopped_by();
                log::info!("shutdown requested (signal {signal:?})");
                return Ok(SessionEnd::Shutdown { signal });
            }

            let blocking = self.timing.is_first() || self.config.continuous;
            let input = source.next_unit(blocking)?;
            log::trace!("read {input:?} (blocking: {blocking})");
            self.report_signals(out)?;

            let unit = match input {
                Input::Interrupted => continue,
                Input::EndOfStream => {
                    log::debug!("end of input");
                    return Ok(SessionEnd::EndOfStream);
                }
                Input::Unit(unit) => unit,
            };

            let Ok(byte) = u8::try_from(unit) else {
                write!(
                    out,
                    "\nUnexpected wide character from input source: {unit} / 0x{unit:x}\n"
                )?;
                out.flush()?;
                log::error!("input unit {unit:#x} does not fit in a byte");
                return Ok(SessionEnd::UnexpectedUnit(unit));
            };

            if self.process_byte(byte, out)? {
                write!(out, "\nExiting at your request.\n")?;
                out.flush()?;
                return Ok(SessionEnd::ExitPhrase);
            }
        }
    }

    /// Writes the report for one byte. Returns true when an exit phrase was completed.
    fn process_byte<W: Write + ?Sized>(&mut self, byte: u8, out: &mut W) -> Result<bool> {
        let elapsed = self.timing.observe(self.clock.now());
        if elapsed.separator {
            writeln!(out)?;
        }
        writeln!(out, "{elapsed}{}", ByteInfo::new(byte))?;

        if let Some(name) = self.matcher.push(byte, self.table) {
            writeln!(out, "Sequence matches bind key name \"{name}\"")?;
        }

        let exit = self.exit_phrase.push(byte);
        out.flush()?;
        Ok(exit)
    }

    fn report_signals<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        for signo in self.shutdown.take_signals() {
            log::debug!("signal {signo} delivered");
            write!(
                out,
                "\nSignal #{signo} ({}) received\n\n",
                signal_name(signo)
            )?;
        }
        out.flush()?;
        Ok(())
    }
}
