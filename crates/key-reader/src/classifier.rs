use std::fmt;

/// Named aliases for the control bytes that have a conventional backslash escape.
const CONTROL_ALIASES: [Option<&str>; 32] = {
    let mut names = [None; 32];
    names[0x07] = Some("\\a");
    names[0x08] = Some("\\b");
    names[0x09] = Some("\\t");
    names[0x0a] = Some("\\n");
    names[0x0b] = Some("\\v");
    names[0x0c] = Some("\\f");
    names[0x0d] = Some("\\r");
    names[0x1b] = Some("\\e");
    names
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    Control {
        caret: char,
        alias: Option<&'static str>,
    },
    Space,
    Del,
    NonAscii,
    Printable(char),
}

impl ByteClass {
    pub fn of(byte: u8) -> Self {
        match byte {
            0x00..=0x1f => ByteClass::Control {
                caret: char::from(byte + 64),
                alias: CONTROL_ALIASES[byte as usize],
            },
            0x20 => ByteClass::Space,
            0x7f => ByteClass::Del,
            0x80..=0xff => ByteClass::NonAscii,
            _ => ByteClass::Printable(char::from(byte)),
        }
    }
}

/// One classified byte, rendered as `dec: ..  oct: ..  hex: ..  char: ..`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteInfo {
    pub byte: u8,
    pub class: ByteClass,
}

impl ByteInfo {
    pub fn new(byte: u8) -> Self {
        Self {
            byte,
            class: ByteClass::of(byte),
        }
    }
}

impl fmt::Display for ByteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = self.byte;
        write!(f, "dec: {byte:3}  oct: {byte:03o}  hex: {byte:02X}  char: ")?;
        match self.class {
            ByteClass::Control { caret, alias } => {
                write!(f, "^{caret}")?;
                if let Some(alias) = alias {
                    write!(f, "   (or {alias})")?;
                }
                Ok(())
            }
            ByteClass::Space => write!(f, "\\{byte:03o}  (aka \"space\")"),
            ByteClass::Del => write!(f, "\\{byte:03o}  (aka \"del\")"),
            ByteClass::NonAscii => write!(f, "\\{byte:03o}  (aka non-ASCII)"),
            ByteClass::Printable(c) => write!(f, "{c}"),
        }
    }
}
