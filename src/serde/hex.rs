use serde::{de::Error as DeError, Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// Renders a 32-bit value as a zero-padded `0x`-prefixed hex string.
pub struct Hex32;

impl SerializeAs<u32> for Hex32 {
    fn serialize_as<S>(value: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_string(*value))
    }
}

impl<'de> DeserializeAs<'de, u32> for Hex32 {
    fn deserialize_as<D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        utils::u32_from_hex(&value)
            .map_err(|err| DeError::custom(format!("invalid hex string: {}", err)))
    }
}

pub fn to_hex_string(value: u32) -> String {
    format!("{:#010x}", value)
}

mod utils {
    use std::num::ParseIntError;

    pub fn u32_from_hex(value: &str) -> Result<u32, ParseIntError> {
        let stripped_value = value.trim_start_matches("0x");
        u32::from_str_radix(stripped_value, 16)
    }
}
