//! Key sequences sent by common xterm-compatible terminals, keyed by bind name.

pub const BUILTIN_KEYS: &[(&str, &[u8])] = &[
    ("up", b"\x1b[A"),
    ("down", b"\x1b[B"),
    ("right", b"\x1b[C"),
    ("left", b"\x1b[D"),
    ("up", b"\x1bOA"),
    ("down", b"\x1bOB"),
    ("right", b"\x1bOC"),
    ("left", b"\x1bOD"),
    ("home", b"\x1b[H"),
    ("end", b"\x1b[F"),
    ("home", b"\x1bOH"),
    ("end", b"\x1bOF"),
    ("home", b"\x1b[1~"),
    ("ic", b"\x1b[2~"),
    ("dc", b"\x1b[3~"),
    ("end", b"\x1b[4~"),
    ("ppage", b"\x1b[5~"),
    ("npage", b"\x1b[6~"),
    ("btab", b"\x1b[Z"),
    ("backspace", b"\x7f"),
    ("f1", b"\x1bOP"),
    ("f2", b"\x1bOQ"),
    ("f3", b"\x1bOR"),
    ("f4", b"\x1bOS"),
    ("f1", b"\x1b[11~"),
    ("f2", b"\x1b[12~"),
    ("f3", b"\x1b[13~"),
    ("f4", b"\x1b[14~"),
    ("f5", b"\x1b[15~"),
    ("f6", b"\x1b[17~"),
    ("f7", b"\x1b[18~"),
    ("f8", b"\x1b[19~"),
    ("f9", b"\x1b[20~"),
    ("f10", b"\x1b[21~"),
    ("f11", b"\x1b[23~"),
    ("f12", b"\x1b[24~"),
    ("sup", b"\x1b[1;2A"),
    ("sdown", b"\x1b[1;2B"),
    ("sright", b"\x1b[1;2C"),
    ("sleft", b"\x1b[1;2D"),
    ("focus-in", b"\x1b[I"),
    ("focus-out", b"\x1b[O"),
];

/// Longest sequence the matcher window can hold.
pub const MAX_SEQUENCE_LEN: usize = 8;
pub const EXIT_PHRASE_LEN: usize = 4;
pub const EXIT_PHRASES: [&[u8; EXIT_PHRASE_LEN]; 2] = [b"exit", b"quit"];

pub const DEFAULT_ESCAPE_TIMEOUT_MS: u16 = 300;
