//! Cancellation token shared between the session loop and signal handlers.
//!
//! Handlers only touch atomics here. Reporting happens in the session loop once the
//! pending read returns.

use nix::sys::signal::Signal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};

/// Signals that end the session. Anything else is only reported.
pub const STOPPING_SIGNALS: [Signal; 4] = [
    Signal::SIGINT,
    Signal::SIGTERM,
    Signal::SIGABRT,
    Signal::SIGSEGV,
];

pub fn is_stopping(signo: i32) -> bool {
    STOPPING_SIGNALS.iter().any(|&sig| sig as i32 == signo)
}

pub fn signal_name(signo: i32) -> &'static str {
    Signal::try_from(signo)
        .map(Signal::as_str)
        .unwrap_or("unknown signal")
}

#[derive(Debug)]
struct TokenState {
    running: AtomicBool,
    pending: AtomicU64,
    stopped_by: AtomicI32,
}

#[derive(Debug, Clone)]
pub struct ShutdownToken {
    state: Arc<TokenState>,
}

impl Default for ShutdownToken {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self {
            state: Arc::new(TokenState {
                running: AtomicBool::new(true),
                pending: AtomicU64::new(0),
                stopped_by: AtomicI32::new(0),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    /// Host-side equivalent of a stopping signal.
    pub fn request_shutdown(&self) {
        self.state.running.store(false, Ordering::SeqCst);
    }

    /// Records a delivered signal. Safe to call from a signal handler.
    pub fn record_signal(&self, signo: i32) {
        if (1..64).contains(&signo) {
            self.state.pending.fetch_or(1u64 << signo, Ordering::SeqCst);
        }
        if is_stopping(signo) {
            self.state.stopped_by.store(signo, Ordering::SeqCst);
            self.state.running.store(false, Ordering::SeqCst);
        }
    }

    /// Signals recorded since the last call, lowest number first.
    pub fn take_signals(&self) -> Vec<i32> {
        let pending = self.state.pending.swap(0, Ordering::SeqCst);
        (1..64)
            .filter(|signo| (pending & (1u64 << signo)) != 0)
            .collect()
    }

    /// The stopping signal that cleared the running flag, if any.
    pub fn stopped_by(&self) -> Option<i32> {
        match self.state.stopped_by.load(Ordering::SeqCst) {
            0 => None,
            signo => Some(signo),
        }
    }
}
