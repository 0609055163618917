//! QSO record and exchange record types.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::types::{Band, FieldValue, Frequency, LineNumber, Mode, QsoNumber};

/// Exchange values keyed by field name, kept in layout order.
///
/// Serializes as a JSON object whose keys follow insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeFields(Vec<(String, FieldValue)>);

impl ExchangeFields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Iterates fields in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no fields are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ExchangeFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = ExchangeFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of exchange field values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = ExchangeFields::new();
                while let Some((name, value)) = access.next_entry::<String, FieldValue>()? {
                    fields.insert(name, value);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

/// One station's side of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Station call sign.
    pub call: String,
    /// Exchange values, one per layout field.
    #[serde(flatten)]
    pub fields: ExchangeFields,
    /// Copy of the exchange as transmitted, taken at parse time.
    pub sent: ExchangeFields,
    /// Transmitter id for multi-transmitter layouts.
    ///
    /// An explicit `null` reads back as [`FieldValue::Invalid`]; a missing key is `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_field_value"
    )]
    pub transmitter: Option<FieldValue>,
}

fn present_field_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FieldValue>, D::Error> {
    FieldValue::deserialize(deserializer).map(Some)
}

impl ExchangeRecord {
    /// Looks up an exchange field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// One logged contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qso {
    /// 1-based order of appearance across QSO and cross-QSO lines.
    pub number: QsoNumber,
    /// 1-based source line.
    pub line: LineNumber,
    /// Logged frequency.
    pub freq: Frequency,
    /// Band derived from `freq`.
    pub band: Band,
    /// Canonical mode.
    pub mode: Mode,
    /// UTC start, `YYYY-MM-DDTHH:MM:00Z`.
    pub start: String,
    /// `start` in milliseconds since the epoch.
    pub start_millis: i64,
    /// Our station.
    pub our: ExchangeRecord,
    /// The worked station.
    pub their: ExchangeRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ExchangeRecord {
        let mut fields = ExchangeFields::new();
        fields.insert("rst", FieldValue::text("599"));
        fields.insert("ituZone", FieldValue::Number(8));
        ExchangeRecord {
            call: "KI2D".to_string(),
            sent: fields.clone(),
            fields,
            transmitter: None,
        }
    }

    #[test]
    fn fields_flatten_beside_call_in_layout_order() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(
            json,
            r#"{"call":"KI2D","rst":"599","ituZone":8,"sent":{"rst":"599","ituZone":8}}"#
        );
    }

    #[test]
    fn exchange_record_round_trips_through_json() {
        let rec = record();
        let back: ExchangeRecord = serde_json::from_str(&serde_json::to_string(&rec).unwrap()).unwrap();
        assert_eq!(back.call, rec.call);
        assert_eq!(back.get("ituZone"), Some(&FieldValue::Number(8)));
        assert_eq!(back.sent, rec.sent);
    }

    #[test]
    fn invalid_transmitter_survives_json() {
        let mut rec = record();
        rec.transmitter = Some(FieldValue::Invalid);
        let json = serde_json::to_string(&rec).unwrap();
        let back: ExchangeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);

        let absent: ExchangeRecord = serde_json::from_str(r#"{"call":"KI2D","sent":{}}"#).unwrap();
        assert_eq!(absent.transmitter, None);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut fields = ExchangeFields::new();
        fields.insert("a", FieldValue::Number(1));
        fields.insert("b", FieldValue::Number(2));
        fields.insert("a", FieldValue::Number(3));
        let names: Vec<_> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(fields.get("a"), Some(&FieldValue::Number(3)));
    }
}
