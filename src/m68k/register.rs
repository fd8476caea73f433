use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Data and address registers that show up in a trace register dump. `A7` (the stack pointer) is
/// not part of the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Register {
    D0 = 0,
    D1 = 1,
    D2 = 2,
    D3 = 3,
    D4 = 4,
    D5 = 5,
    D6 = 6,
    D7 = 7,
    A0 = 8,
    A1 = 9,
    A2 = 10,
    A3 = 11,
    A4 = 12,
    A5 = 13,
    A6 = 14,
}

/// Operand size, taken from a `.b`/`.w`/`.l` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "b")]
    Byte,
    #[serde(rename = "w")]
    Word,
    #[serde(rename = "l")]
    Long,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown register: {0}")]
    UnknownRegister(String),
}

impl Register {
    pub const COUNT: usize = 15;

    pub const ALL: [Register; Register::COUNT] = [
        Register::D0,
        Register::D1,
        Register::D2,
        Register::D3,
        Register::D4,
        Register::D5,
        Register::D6,
        Register::D7,
        Register::A0,
        Register::A1,
        Register::A2,
        Register::A3,
        Register::A4,
        Register::A5,
        Register::A6,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::D0 => "D0",
            Register::D1 => "D1",
            Register::D2 => "D2",
            Register::D3 => "D3",
            Register::D4 => "D4",
            Register::D5 => "D5",
            Register::D6 => "D6",
            Register::D7 => "D7",
            Register::A0 => "A0",
            Register::A1 => "A1",
            Register::A2 => "A2",
            Register::A3 => "A3",
            Register::A4 => "A4",
            Register::A5 => "A5",
            Register::A6 => "A6",
        }
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Register {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Register::ALL
            .iter()
            .copied()
            .find(|register| register.name() == s)
            .ok_or_else(|| Error::UnknownRegister(s.to_owned()))
    }
}

impl Size {
    pub const fn mask(self) -> u32 {
        match self {
            Size::Byte => 0xff,
            Size::Word => 0xffff,
            Size::Long => 0xffff_ffff,
        }
    }

    /// Parses a size suffix letter. Anything other than `b`, `w` or `l` (in either case) yields
    /// `None`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "b" | "B" => Some(Size::Byte),
            "w" | "W" => Some(Size::Word),
            "l" | "L" => Some(Size::Long),
            _ => None,
        }
    }
}

/// Splits `REG.s` into the register part and the optional suffix.
pub fn split_size_suffix(token: &str) -> (&str, Option<&str>) {
    match token.split_once('.') {
        Some((name, suffix)) => (name, Some(suffix)),
        None => (token, None),
    }
}
