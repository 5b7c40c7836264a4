use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Read;

/// One answer as written in a response file, before duplicate checks.
#[derive(Debug)]
pub(crate) struct ResponseEntry {
    pub(crate) question_id: String,
    pub(crate) response: i8,
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<ResponseEntry>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for record in csv_reader.deserialize::<ResponseRow>() {
        let row = record?;
        entries.push(ResponseEntry {
            question_id: row.question_id,
            response: row.response,
        });
    }

    Ok(entries)
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<ResponseEntry>, serde_json::Error> {
    let object: ResponseObject = serde_json::from_reader(reader)?;
    Ok(object.0)
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    question_id: String,
    response: i8,
}

/// JSON object kept in file order with repeated keys preserved, so duplicates
/// can be reported instead of silently overwritten.
struct ResponseObject(Vec<ResponseEntry>);

impl<'de> Deserialize<'de> for ResponseObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ResponseObject;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping question ids to integer responses")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((question_id, response)) = map.next_entry::<String, i8>()? {
                    entries.push(ResponseEntry {
                        question_id,
                        response,
                    });
                }
                Ok(ResponseObject(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
