use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{As, Same};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    m68k::{
        register::Register,
        trace::{error::DecodeError, literal::parse_hex, DecodeOptions},
    },
    serde::hex::Hex32,
};

/// Register values observed at one point of the trace. Registers missing from the dump stay
/// unresolved rather than reading as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSnapshot {
    values: [Option<u32>; Register::COUNT],
}

impl RegisterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a space-separated `REG=HEX` dump. Later pairs for the same register win.
    pub fn parse(raw: &str, options: DecodeOptions) -> Result<Self, DecodeError> {
        let mut snapshot = Self::new();

        for pair in raw.split(' ').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| DecodeError::MalformedRegisterPair(pair.to_owned()))?;

            let register = match name.parse::<Register>() {
                Ok(register) => register,
                Err(_) if options.strict => {
                    return Err(DecodeError::UnknownRegister(name.to_owned()));
                }
                Err(_) => {
                    debug!(register = name, "skipping register outside the D0-A6 set");
                    continue;
                }
            };

            let value = parse_hex(value)
                .map_err(|source| DecodeError::InvalidRegisterValue { register, source })?;
            snapshot.values[register.index()] = Some(value);
        }

        Ok(snapshot)
    }

    /// Reads one register out of a dump without building a snapshot. Pairs that do not parse are
    /// skipped, and later valid pairs win.
    pub fn lookup(raw: &str, register: Register) -> Option<u32> {
        raw.split(' ')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(name, _)| name.parse::<Register>().ok() == Some(register))
            .filter_map(|(_, value)| parse_hex(value).ok())
            .last()
    }

    pub fn get(&self, register: Register) -> Option<u32> {
        self.values[register.index()]
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present registers in D0..D7, A0..A6 order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, u32)> + '_ {
        Register::ALL
            .iter()
            .filter_map(|register| self.get(*register).map(|value| (*register, value)))
    }
}

impl FromIterator<(Register, u32)> for RegisterSnapshot {
    fn from_iter<T: IntoIterator<Item = (Register, u32)>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for (register, value) in iter {
            snapshot.values[register.index()] = Some(value);
        }
        snapshot
    }
}

impl Serialize for RegisterSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let values = self.iter().collect::<BTreeMap<_, _>>();
        As::<BTreeMap<Same, Hex32>>::serialize(&values, serializer)
    }
}

impl<'de> Deserialize<'de> for RegisterSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values: BTreeMap<Register, u32> =
            As::<BTreeMap<Same, Hex32>>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}
