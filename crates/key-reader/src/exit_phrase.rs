use crate::escape_sequences::{EXIT_PHRASE_LEN, EXIT_PHRASES};
use crate::window::RecentBytes;

/// Fires when the last four bytes spell `exit` or `quit` exactly.
#[derive(Debug, Default)]
pub struct ExitPhraseDetector {
    recent: RecentBytes<EXIT_PHRASE_LEN>,
}

impl ExitPhraseDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8) -> bool {
        self.recent.push(byte);
        EXIT_PHRASES
            .iter()
            .any(|phrase| self.recent.matches(&phrase[..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut ExitPhraseDetector, bytes: &[u8]) -> Vec<bool> {
        bytes.iter().map(|&b| detector.push(b)).collect()
    }

    #[test]
    fn test_exit() {
        let mut detector = ExitPhraseDetector::new();
        assert_eq!(
            feed(&mut detector, b"exit"),
            vec![false, false, false, true]
        );
    }

    #[test]
    fn test_quit() {
        let mut detector = ExitPhraseDetector::new();
        assert_eq!(
            feed(&mut detector, b"quit"),
            vec![false, false, false, true]
        );
    }

    #[test]
    fn test_after_other_input() {
        let mut detector = ExitPhraseDetector::new();
        let results = feed(&mut detector, b"hello exit");
        assert_eq!(results.iter().filter(|&&hit| hit).count(), 1);
        assert_eq!(results.last(), Some(&true));
    }

    #[test]
    fn test_interleaved_byte_breaks_match() {
        let mut detector = ExitPhraseDetector::new();
        assert!(!feed(&mut detector, b"exzit").into_iter().any(|hit| hit));
        let mut detector = ExitPhraseDetector::new();
        assert!(!feed(&mut detector, b"qu\x1bit").into_iter().any(|hit| hit));
    }

    #[test]
    fn test_case_sensitive() {
        let mut detector = ExitPhraseDetector::new();
        assert!(!feed(&mut detector, b"EXITQuit").into_iter().any(|hit| hit));
    }

    #[test]
    fn test_partial_phrase() {
        let mut detector = ExitPhraseDetector::new();
        assert!(!feed(&mut detector, b"xit").into_iter().any(|hit| hit));
    }
}
