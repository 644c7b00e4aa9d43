//! Numeric literal parsing for `mask` / `match` values.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Radix {
    fn value(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }

    fn accepts(self, ch: char) -> bool {
        match self {
            Radix::Binary => matches!(ch, '0' | '1'),
            Radix::Octal => matches!(ch, '0'..='7'),
            Radix::Decimal => ch.is_ascii_digit(),
            Radix::Hex => ch.is_ascii_hexdigit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    Empty,
    MissingDigits,
    InvalidDigit { ch: char, radix: u32 },
    Overflow,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralError::Empty => write!(f, "empty numeric literal"),
            LiteralError::MissingDigits => write!(f, "radix prefix must be followed by digits"),
            LiteralError::InvalidDigit { ch, radix } => {
                write!(f, "invalid digit '{ch}' for base {radix}")
            }
            LiteralError::Overflow => write!(f, "value does not fit in 32 bits"),
        }
    }
}

/// Parses `0x` / `0b` / `0o` prefixed or plain decimal text into a 32-bit word.
/// Underscores may separate digits.
pub fn parse_word(text: &str) -> Result<u32, LiteralError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LiteralError::Empty);
    }
    let (radix, digits) = split_radix(text);
    let mut value: u32 = 0;
    let mut digits_consumed = 0usize;
    for ch in digits.chars() {
        if ch == '_' {
            continue;
        }
        if !radix.accepts(ch) {
            return Err(LiteralError::InvalidDigit {
                ch,
                radix: radix.value(),
            });
        }
        let digit = ch.to_digit(radix.value()).ok_or(LiteralError::InvalidDigit {
            ch,
            radix: radix.value(),
        })?;
        value = value
            .checked_mul(radix.value())
            .and_then(|v| v.checked_add(digit))
            .ok_or(LiteralError::Overflow)?;
        digits_consumed += 1;
    }
    if digits_consumed == 0 {
        return Err(LiteralError::MissingDigits);
    }
    Ok(value)
}

fn split_radix(text: &str) -> (Radix, &str) {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(Radix::Hex),
            b'b' | b'B' => Some(Radix::Binary),
            b'o' | b'O' => Some(Radix::Octal),
            _ => None,
        };
        if let Some(radix) = radix {
            return (radix, &text[2..]);
        }
    }
    (Radix::Decimal, text)
}
