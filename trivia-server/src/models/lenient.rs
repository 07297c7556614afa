//! Integer fields the quiz frontend sends either as numbers or as strings

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

impl IntOrText {
    fn into_i32<E: de::Error>(self) -> Result<i32, E> {
        let wide = match self {
            Self::Int(n) => n,
            Self::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(&s), &"an integer"))?,
        };
        i32::try_from(wide).map_err(|_| E::invalid_value(de::Unexpected::Signed(wide), &"a 32-bit integer"))
    }
}

pub(crate) fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    IntOrText::deserialize(deserializer)?.into_i32()
}

pub(crate) fn opt_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntOrText>::deserialize(deserializer)?
        .map(IntOrText::into_i32)
        .transpose()
}
