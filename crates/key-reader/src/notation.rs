//! Parses the textual key notation used in config files (`\e[A`, `^[OP`, `\x1b`, `\177`)
//! into raw bytes.

use anyhow::{Result, bail};
use memchr::memchr2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotationState {
    Literal,
    Backslash,
    Caret,
    Control,
    Hex { digits: u8, value: u8 },
    Octal { digits: u8, value: u16 },
}

pub struct NotationParser {
    state: NotationState,
    output: Vec<u8>,
}

impl Default for NotationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NotationParser {
    pub fn new() -> Self {
        Self {
            state: NotationState::Literal,
            output: Vec::with_capacity(8),
        }
    }

    pub fn feed(&mut self, byte: u8) -> Result<()> {
        let state = self.state;
        self.state = match state {
            NotationState::Literal => self.literal(byte),
            NotationState::Backslash => self.backslash(byte)?,
            NotationState::Caret => self.caret(byte)?,
            NotationState::Control => {
                self.output.push(control(byte)?);
                NotationState::Literal
            }
            NotationState::Hex { digits, value } => self.hex(byte, digits, value)?,
            NotationState::Octal { digits, value } => self.octal(byte, digits, value)?,
        };
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<u8>> {
        match self.state {
            NotationState::Literal => Ok(self.output),
            NotationState::Hex { digits, value } if digits > 0 => {
                self.output.push(value);
                Ok(self.output)
            }
            NotationState::Octal { value, .. } => {
                self.output.push(octal_byte(value)?);
                Ok(self.output)
            }
            _ => bail!("sequence ends inside an escape"),
        }
    }

    fn literal(&mut self, byte: u8) -> NotationState {
        match byte {
            b'\\' => NotationState::Backslash,
            b'^' => NotationState::Caret,
            _ => {
                self.output.push(byte);
                NotationState::Literal
            }
        }
    }

    fn backslash(&mut self, byte: u8) -> Result<NotationState> {
        let escaped = match byte {
            b'e' | b'E' => 0x1b,
            b'a' => 0x07,
            b'b' => 0x08,
            b't' => b'\t',
            b'n' => b'\n',
            b'v' => 0x0b,
            b'f' => 0x0c,
            b'r' => b'\r',
            b'\\' => b'\\',
            b'^' => b'^',
            b'c' => return Ok(NotationState::Control),
            b'x' => {
                return Ok(NotationState::Hex {
                    digits: 0,
                    value: 0,
                });
            }
            b'0'..=b'7' => {
                return Ok(NotationState::Octal {
                    digits: 1,
                    value: u16::from(byte - b'0'),
                });
            }
            _ => bail!("unknown escape \\{}", char::from(byte)),
        };
        self.output.push(escaped);
        Ok(NotationState::Literal)
    }

    fn caret(&mut self, byte: u8) -> Result<NotationState> {
        self.output.push(control(byte)?);
        Ok(NotationState::Literal)
    }

    fn hex(&mut self, byte: u8, digits: u8, value: u8) -> Result<NotationState> {
        match (byte as char).to_digit(16) {
            Some(d) => {
                let value = value * 16 + d as u8;
                if digits + 1 == 2 {
                    self.output.push(value);
                    Ok(NotationState::Literal)
                } else {
                    Ok(NotationState::Hex {
                        digits: digits + 1,
                        value,
                    })
                }
            }
            None if digits > 0 => {
                self.output.push(value);
                Ok(self.literal(byte))
            }
            None => bail!("\\x needs at least one hex digit"),
        }
    }

    fn octal(&mut self, byte: u8, digits: u8, value: u16) -> Result<NotationState> {
        match byte {
            b'0'..=b'7' => {
                let value = value * 8 + u16::from(byte - b'0');
                if digits + 1 == 3 {
                    self.output.push(octal_byte(value)?);
                    Ok(NotationState::Literal)
                } else {
                    Ok(NotationState::Octal {
                        digits: digits + 1,
                        value,
                    })
                }
            }
            _ => {
                self.output.push(octal_byte(value)?);
                Ok(self.literal(byte))
            }
        }
    }
}

fn control(byte: u8) -> Result<u8> {
    match byte {
        b'?' => Ok(0x7f),
        b'@'..=b'_' => Ok(byte - 64),
        b'a'..=b'z' => Ok(byte - 96),
        _ => bail!("invalid control character ^{}", char::from(byte)),
    }
}

fn octal_byte(value: u16) -> Result<u8> {
    u8::try_from(value).map_err(|_| anyhow::anyhow!("octal escape \\{value:o} exceeds one byte"))
}

/// Parses a whole notation string.
pub fn parse_notation(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    if memchr2(b'\\', b'^', bytes).is_none() {
        return Ok(bytes.to_vec());
    }
    let mut parser = NotationParser::new();
    for &byte in bytes {
        parser.feed(byte)?;
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_notation("abc").unwrap(), b"abc");
    }

    #[test]
    fn test_backslash_e() {
        assert_eq!(parse_notation("\\e[A").unwrap(), b"\x1b[A");
    }

    #[test]
    fn test_caret_escape() {
        assert_eq!(parse_notation("^[OP").unwrap(), b"\x1bOP");
        assert_eq!(parse_notation("^?").unwrap(), b"\x7f");
        assert_eq!(parse_notation("^a").unwrap(), b"\x01");
    }

    #[test]
    fn test_backslash_c() {
        assert_eq!(parse_notation("\\cH").unwrap(), b"\x08");
    }

    #[test]
    fn test_hex() {
        assert_eq!(parse_notation("\\x1b[1;5C").unwrap(), b"\x1b[1;5C");
        assert_eq!(parse_notation("\\x7").unwrap(), b"\x07");
        assert_eq!(parse_notation("\\x9z").unwrap(), b"\x09z");
    }

    #[test]
    fn test_octal() {
        assert_eq!(parse_notation("\\177").unwrap(), b"\x7f");
        assert_eq!(parse_notation("\\033[H").unwrap(), b"\x1b[H");
        assert_eq!(parse_notation("\\0").unwrap(), b"\x00");
    }

    #[test]
    fn test_named_escapes() {
        assert_eq!(
            parse_notation("\\a\\b\\t\\n\\v\\f\\r\\\\\\^").unwrap(),
            b"\x07\x08\t\n\x0b\x0c\r\\^"
        );
    }

    #[test]
    fn test_dangling_backslash() {
        assert!(parse_notation("abc\\").is_err());
        assert!(parse_notation("^").is_err());
    }

    #[test]
    fn test_bad_hex() {
        assert!(parse_notation("\\xg").is_err());
    }

    #[test]
    fn test_octal_overflow() {
        assert!(parse_notation("\\777").is_err());
    }

    #[test]
    fn test_unknown_escape() {
        assert!(parse_notation("\\q").is_err());
    }
}
