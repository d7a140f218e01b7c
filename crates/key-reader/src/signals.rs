use crate::shutdown::ShutdownToken;
use anyhow::{Context, Result};
use nix::sys::signal::Signal;
use signal_hook::SigId;
use signal_hook::consts::FORBIDDEN;

/// Hardware faults re-run the faulting instruction if a handler returns, so they keep
/// their default action alongside the ones in [`FORBIDDEN`].
const FAULT_SIGNALS: [Signal; 3] = [Signal::SIGBUS, Signal::SIGTRAP, Signal::SIGSYS];

/// Classic signals that can be caught and safely returned from.
pub fn catchable_signals() -> Vec<i32> {
    (1..32)
        .filter(|signo| !FORBIDDEN.contains(signo))
        .filter(|&signo| !FAULT_SIGNALS.iter().any(|&sig| sig as i32 == signo))
        .collect()
}

/// Routes signals into a [`ShutdownToken`] until dropped.
pub struct SignalGuard {
    ids: Vec<SigId>,
}

impl SignalGuard {
    /// Every catchable classic signal, so none of them kills the process with the
    /// terminal still in raw mode.
    pub fn register(token: &ShutdownToken) -> Result<Self> {
        Self::register_signals(token, &catchable_signals())
    }

    pub fn register_signals(token: &ShutdownToken, signals: &[i32]) -> Result<Self> {
        let mut guard = Self {
            ids: Vec::with_capacity(signals.len()),
        };
        for &signo in signals {
            let token = token.clone();
            // SAFETY: the action only performs atomic operations on the token.
            let id = unsafe {
                signal_hook::low_level::register(signo, move || token.record_signal(signo))
            }
            .with_context(|| format!("Failed to install handler for signal {signo}"))?;
            guard.ids.push(id);
        }
        log::debug!("installed {} signal handlers", guard.ids.len());
        Ok(guard)
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}
