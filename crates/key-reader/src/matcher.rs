use crate::escape_sequences::MAX_SEQUENCE_LEN;
use crate::key_table::KeyNameTable;
use crate::window::RecentBytes;

/// Recognizes known key sequences ending at the most recent byte.
///
/// Suffixes are tried from length 1 upward and the first hit wins, so a single byte
/// with its own name is reported even when it also ends a longer known sequence.
/// The window is never cleared; bytes from an earlier keystroke can take part in a match.
#[derive(Debug, Default)]
pub struct SequenceMatcher {
    recent: RecentBytes<MAX_SEQUENCE_LEN>,
}

impl SequenceMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<'t, T>(&mut self, byte: u8, table: &'t T) -> Option<&'t str>
    where
        T: KeyNameTable + ?Sized,
    {
        self.recent.push(byte);

        let mut buf = [0u8; MAX_SEQUENCE_LEN];
        let seen = self.recent.len();
        for (slot, byte) in buf.iter_mut().zip(self.recent.iter()) {
            *slot = byte;
        }

        for len in 1..=seen {
            let candidate = &buf[seen - len..seen];
            if let Some(name) = table.lookup(candidate) {
                log::trace!("matched {candidate:02x?} as {name}");
                return Some(name);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_table::KeyTable;

    fn feed<'t>(
        matcher: &mut SequenceMatcher,
        table: &'t KeyTable,
        bytes: &[u8],
    ) -> Vec<Option<&'t str>> {
        bytes.iter().map(|&b| matcher.push(b, table)).collect()
    }

    #[test]
    fn test_two_byte_match_after_single_byte_fails() {
        let table = KeyTable::from_entries([("F1", &b"\x1b\x4f"[..])]);
        let mut matcher = SequenceMatcher::new();
        let results = feed(&mut matcher, &table, &[0x41, 0x1b, 0x4f]);
        assert_eq!(results, vec![None, None, Some("F1")]);
    }

    #[test]
    fn test_shortest_match_wins() {
        let table = KeyTable::from_entries([("O", &b"\x4f"[..]), ("F1", &b"\x1b\x4f"[..])]);
        let mut matcher = SequenceMatcher::new();
        let results = feed(&mut matcher, &table, &[0x1b, 0x4f]);
        assert_eq!(results, vec![None, Some("O")]);
    }

    #[test]
    fn test_full_window_match() {
        let table = KeyTable::from_entries([("long", &b"12345678"[..])]);
        let mut matcher = SequenceMatcher::new();
        let results = feed(&mut matcher, &table, b"012345678");
        assert_eq!(results.last(), Some(&Some("long")));
    }

    #[test]
    fn test_longer_than_window_never_matches() {
        let table = KeyTable::from_entries([("too-long", &b"123456789"[..])]);
        let mut matcher = SequenceMatcher::new();
        let results = feed(&mut matcher, &table, b"123456789");
        assert!(results.iter().all(Option::is_none));
    }

    #[test]
    fn test_unfilled_window_does_not_match_nul_padding() {
        let table = KeyTable::from_entries([("nul-a", &b"\x00a"[..])]);
        let mut matcher = SequenceMatcher::new();
        assert_eq!(matcher.push(b'a', &table), None);
    }

    #[test]
    fn test_window_survives_between_keystrokes() {
        let table = KeyTable::from_entries([("ab", &b"ab"[..])]);
        let mut matcher = SequenceMatcher::new();
        assert_eq!(feed(&mut matcher, &table, b"a"), vec![None]);
        assert_eq!(feed(&mut matcher, &table, b"b"), vec![Some("ab")]);
    }

    #[test]
    fn test_builtin_arrow_key_burst() {
        let table = KeyTable::builtin();
        let mut matcher = SequenceMatcher::new();
        let results = feed(&mut matcher, &table, b"\x1b[C");
        assert_eq!(results, vec![None, None, Some("right")]);
    }
}
