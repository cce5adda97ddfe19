use std::fmt;

use razor_client::Serial;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("'{0}' is not an integer")]
    NotInteger(String),
    #[error("'{0}' is not an unsigned integer")]
    NotUnsigned(String),
    #[error("'{0}' is not 'on' or 'off'")]
    NotBool(String),
    #[error("'{value}' is out of range (max {max})")]
    OutOfRange { value: String, max: u32 },
}

/// One positional token of a script instruction.
///
/// Arguments are untyped until a handler asks for a specific type; each
/// coercion either succeeds or reports an [`ArgumentError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Argument {
    lexeme: String,
}

impl Argument {
    pub fn new(lexeme: impl Into<String>) -> Self {
        Self {
            lexeme: lexeme.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.lexeme
    }

    pub fn as_string(&self) -> String {
        self.lexeme.clone()
    }

    /// Signed integer, decimal or `0x` hex
    pub fn as_int(&self) -> Result<i32, ArgumentError> {
        let text = self.lexeme.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let magnitude = parse_unsigned(digits)
            .and_then(|value| i64::try_from(value).ok())
            .ok_or_else(|| ArgumentError::NotInteger(self.lexeme.clone()))?;
        let value = if negative { -magnitude } else { magnitude };
        i32::try_from(value).map_err(|_| ArgumentError::NotInteger(self.lexeme.clone()))
    }

    /// Unsigned integer, decimal or `0x` hex
    pub fn as_uint(&self) -> Result<u32, ArgumentError> {
        parse_unsigned(self.lexeme.trim())
            .ok_or_else(|| ArgumentError::NotUnsigned(self.lexeme.clone()))
    }

    /// Unsigned integer, or `default` when the token is not one
    pub fn as_uint_or(&self, default: u32) -> u32 {
        self.as_uint().unwrap_or(default)
    }

    /// Graphic ids and hues are 16-bit
    pub fn as_u16(&self) -> Result<u16, ArgumentError> {
        let value = self.as_uint()?;
        u16::try_from(value).map_err(|_| ArgumentError::OutOfRange {
            value: self.lexeme.clone(),
            max: u16::MAX as u32,
        })
    }

    pub fn as_bool(&self) -> Result<bool, ArgumentError> {
        match self.lexeme.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => Ok(true),
            "off" | "false" | "0" => Ok(false),
            _ => Err(ArgumentError::NotBool(self.lexeme.clone())),
        }
    }

    /// A serial written out literally; alias names return `None`
    pub fn as_serial_literal(&self) -> Option<Serial> {
        parse_unsigned(self.lexeme.trim()).map(Serial)
    }

    /// Case-insensitive keyword comparison
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.lexeme.trim().eq_ignore_ascii_case(keyword)
    }
}

fn parse_unsigned(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse::<u32>().ok(),
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::new(value)
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::new(value)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}
