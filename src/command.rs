use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Kind of the single value a command carries.
///
/// The ordinal doubles as the index of the command template declared by the
/// contract, so `Uint` commands are rendered with template 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    String = 0,
    Uint = 1,
    Int = 2,
    Decimals = 3,
    EthAddr = 4,
}

impl CommandType {
    pub const ALL: [CommandType; 5] = [
        CommandType::String,
        CommandType::Uint,
        CommandType::Int,
        CommandType::Decimals,
        CommandType::EthAddr,
    ];

    pub fn template_idx(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandType::String => "String",
            CommandType::Uint => "Uint",
            CommandType::Int => "Int",
            CommandType::Decimals => "Decimals",
            CommandType::EthAddr => "EthAddr",
        };
        f.write_str(name)
    }
}

impl TryFrom<u64> for CommandType {
    type Error = Error;

    fn try_from(tag: u64) -> Result<Self> {
        usize::try_from(tag)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| Error::UnsupportedCommandType(tag.to_string()))
    }
}

impl FromStr for CommandType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        if let Ok(ordinal) = tag.parse::<u64>() {
            return Self::try_from(ordinal);
        }
        Self::ALL
            .into_iter()
            .find(|ty| ty.to_string().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::UnsupportedCommandType(tag.to_string()))
    }
}

/// Encodes a command value into the positional parameters sent to the relayer.
///
/// `Uint` and `Int` values are checked to be integral (and non-negative for
/// `Uint`) but are forwarded in their original textual form. `String`,
/// `Decimals` and `EthAddr` values are forwarded unchecked.
pub fn encode_command_params(command_type: CommandType, value: &str) -> Result<Vec<String>> {
    match command_type {
        CommandType::Uint => {
            let number = parse_integer(value)
                .ok_or_else(|| Error::InvalidParameter("Uint value must be an integer".into()))?;
            if number < 0.0 {
                return Err(Error::InvalidParameter(
                    "Uint value must be greater than or equal to 0".into(),
                ));
            }
        }
        CommandType::Int => {
            parse_integer(value)
                .ok_or_else(|| Error::InvalidParameter("Int value must be an integer".into()))?;
        }
        // TODO: validate the decimal and address formats once the relayer documents them.
        CommandType::String | CommandType::Decimals | CommandType::EthAddr => {}
    }
    Ok(vec![value.to_string()])
}

// Follows JavaScript `Number()`: blank text is 0 and unsigned 0x/0o/0b
// literals are read by radix.
fn parse_integer(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Some(0.0);
    }
    let radix = match value.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &value[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && number.fract() == 0.0)
}
