use crate::escape_sequences::BUILTIN_KEYS;
use crate::notation::parse_notation;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};

/// Read-only lookup from a byte sequence to a symbolic key name.
pub trait KeyNameTable {
    fn lookup(&self, sequence: &[u8]) -> Option<&str>;
}

#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    names: HashMap<Vec<u8>, String>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sequences of common xterm-compatible terminals.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for &(name, sequence) in BUILTIN_KEYS {
            table.insert(name, sequence);
        }
        table
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let mut table = Self::new();
        for (name, sequence) in entries {
            table.insert(name, sequence);
        }
        table
    }

    /// Adds or replaces the name for `sequence`. Empty sequences are ignored.
    pub fn insert(&mut self, name: &str, sequence: &[u8]) {
        if sequence.is_empty() {
            return;
        }
        self.names.insert(sequence.to_vec(), name.to_string());
    }

    /// Merges `name = "notation"` entries, overriding existing names for the same bytes.
    pub fn extend_from_notation(&mut self, entries: &BTreeMap<String, String>) -> Result<()> {
        for (name, notation) in entries {
            let sequence = parse_notation(notation)
                .with_context(|| format!("Invalid sequence for key \"{name}\": {notation}"))?;
            log::debug!("custom key {name} = {sequence:02x?}");
            self.insert(name, &sequence);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl KeyNameTable for KeyTable {
    fn lookup(&self, sequence: &[u8]) -> Option<&str> {
        self.names.get(sequence).map(String::as_str)
    }
}

impl<F> KeyNameTable for F
where
    F: Fn(&[u8]) -> Option<&'static str>,
{
    fn lookup(&self, sequence: &[u8]) -> Option<&str> {
        self(sequence)
    }
}
