// Sequences of integers, with each element handled like `crate::string_or_native`.

use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    marker::PhantomData,
    str::FromStr,
};

use serde::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

#[derive(Deserialize, Serialize)]
#[serde(bound(
    deserialize = "T: Deserialize<'de> + FromStr<Err: Display>",
    serialize = "T: Serialize + Display",
))]
struct Element<T>(#[serde(with = "crate::string_or_native")] T);

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: Deserialize<'de> + FromStr<Err: Display>,
    D: Deserializer<'de>,
{
    struct SequenceVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de> + FromStr<Err: Display>> Visitor<'de> for SequenceVisitor<T> {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
            formatter.write_str("a sequence of integers or strings containing them")
        }

        fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
            let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or_default());

            while let Some(Element(element)) = seq.next_element()? {
                elements.push(element);
            }

            Ok(elements)
        }
    }

    deserializer.deserialize_seq(SequenceVisitor(PhantomData))
}

pub fn serialize<S: Serializer>(
    elements: impl IntoIterator<Item = impl Serialize + Display>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(elements.into_iter().map(Element))
}
