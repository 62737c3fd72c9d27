// Integers are written as strings in human-readable formats and as native integers otherwise.
// Deserialization accepts either representation from human-readable formats.

use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    marker::PhantomData,
    str::FromStr,
};

use serde::{
    de::{Error, IntoDeserializer as _, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + FromStr<Err: Display>,
    D: Deserializer<'de>,
{
    struct StringOrNativeVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de> + FromStr<Err: Display>> Visitor<'de>
        for StringOrNativeVisitor<T>
    {
        type Value = T;

        fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
            formatter.write_str("an integer or a string containing one")
        }

        fn visit_str<E: Error>(self, string: &str) -> Result<Self::Value, E> {
            string.parse().map_err(E::custom)
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            T::deserialize(value.into_deserializer())
        }
    }

    if deserializer.is_human_readable() {
        deserializer.deserialize_any(StringOrNativeVisitor(PhantomData))
    } else {
        T::deserialize(deserializer)
    }
}

pub fn serialize<S: Serializer>(
    value: impl Serialize + Display,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.collect_str(&value)
    } else {
        value.serialize(serializer)
    }
}
