use crate::session::{ByteSource, Input};
use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::sys::termios::{self, InputFlags, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::os::fd::{AsFd, OwnedFd};

/// Reads single bytes from a file descriptor without any userspace buffering.
pub struct TtySource {
    input: File,
    escape_timeout: PollTimeout,
}

impl TtySource {
    pub fn stdin(escape_timeout_ms: u16) -> Result<Self> {
        let fd = io::stdin()
            .as_fd()
            .try_clone_to_owned()
            .context("Failed to duplicate stdin")?;
        Ok(Self::from_fd(fd, escape_timeout_ms))
    }

    pub fn from_fd(fd: OwnedFd, escape_timeout_ms: u16) -> Self {
        Self {
            input: File::from(fd),
            escape_timeout: PollTimeout::from(escape_timeout_ms),
        }
    }
}

impl ByteSource for TtySource {
    fn next_unit(&mut self, blocking: bool) -> Result<Input> {
        let timeout = if blocking {
            PollTimeout::NONE
        } else {
            self.escape_timeout
        };

        {
            let mut fds = [PollFd::new(self.input.as_fd(), PollFlags::POLLIN)];
            match poll(&mut fds, timeout) {
                Ok(0) => return Ok(Input::EndOfStream),
                Ok(_) => {}
                Err(Errno::EINTR) => return Ok(Input::Interrupted),
                Err(e) => return Err(e).context("Failed to poll input"),
            }
        }

        let mut byte = [0u8; 1];
        match self.input.read(&mut byte) {
            Ok(0) => Ok(Input::EndOfStream),
            Ok(_) => Ok(Input::Unit(u32::from(byte[0]))),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Input::Interrupted),
            Err(e) => Err(e).context("Failed to read input"),
        }
    }
}

/// Puts the terminal on stdin into raw mode until dropped.
///
/// Canonical mode, echo, signal keys and CR/NL translation are all disabled so every
/// key arrives exactly as the terminal sent it. Output processing is left alone.
pub struct RawModeGuard {
    fd: OwnedFd,
    original: Termios,
}

impl RawModeGuard {
    /// Returns `None` when stdin is not a terminal.
    pub fn enable() -> Result<Option<Self>> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            log::warn!("stdin is not a terminal, reading bytes as they arrive");
            return Ok(None);
        }

        let fd = stdin
            .as_fd()
            .try_clone_to_owned()
            .context("Failed to duplicate stdin")?;
        let original = termios::tcgetattr(&fd).context("Failed to read terminal mode")?;

        let mut raw = original.clone();
        raw.input_flags.remove(
            InputFlags::ICRNL
                | InputFlags::INLCR
                | InputFlags::IGNCR
                | InputFlags::ISTRIP
                | InputFlags::IXON,
        );
        let local = LocalFlags::ICANON | LocalFlags::ECHO | LocalFlags::ISIG | LocalFlags::IEXTEN;
        raw.local_flags.remove(local);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(&fd, SetArg::TCSANOW, &raw).context("Failed to enter raw mode")?;
        log::debug!("terminal in raw mode");

        Ok(Some(Self { fd, original }))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = termios::tcsetattr(&self.fd, SetArg::TCSANOW, &self.original) {
            log::error!("failed to restore terminal mode: {e}");
        }
    }
}
