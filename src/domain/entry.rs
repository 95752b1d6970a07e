//! Travel entry model

use crate::domain::location::Coordinates;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One journaled travel memory.
///
/// `date` is kept as the text it was stored with so that entries survive a
/// load/save cycle byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
}

/// Lenient shape used when reading the persisted collection.
/// Every field may be missing; `into_entry` decides what survives.
/// Optional fields stay raw so an odd shape drops the field, not the record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredEntry {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    location: Option<Value>,
    address: Option<Value>,
    date: Option<Value>,
}

impl StoredEntry {
    fn into_entry(self) -> Option<TravelEntry> {
        let id = non_empty(self.id)?;
        let title = non_empty(self.title)?;
        let description = non_empty(self.description)?;
        let image = non_empty(self.image)?;

        Some(TravelEntry {
            id,
            title,
            description,
            image,
            location: self.location.as_ref().and_then(decode_location),
            address: self
                .address
                .and_then(|value| value.as_str().map(str::to_string)),
            date: self.date.as_ref().and_then(decode_date).unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts `{latitude, longitude}` or a position wrapped in `coords`,
/// with numbers or numeric strings.
fn decode_location(value: &Value) -> Option<Coordinates> {
    let point = value.get("coords").unwrap_or(value);
    let latitude = decode_number(point.get("latitude")?)?;
    let longitude = decode_number(point.get("longitude")?)?;
    Coordinates::new(latitude, longitude).ok()
}

fn decode_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str()?.trim().parse().ok())
}

/// Text dates are kept verbatim; epoch milliseconds become RFC 3339
fn decode_date(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        _ => None,
    }
}

impl TravelEntry {
    /// Build a new entry stamped with `now`.
    /// The id is the Unix time in milliseconds.
    pub fn create(
        now: DateTime<Utc>,
        image: String,
        title: &str,
        description: &str,
        location: Option<Coordinates>,
        address: Option<String>,
    ) -> Self {
        TravelEntry {
            id: now.timestamp_millis().to_string(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            image,
            location,
            address,
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// True when every required field is present and non-blank
    pub fn is_well_formed(&self) -> bool {
        [&self.id, &self.title, &self.description, &self.image]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Parse the stored date, if it is valid RFC 3339
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Address text if it is set and not blank
    pub fn display_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// Decode a persisted collection.
///
/// Fails only when the text is not a JSON array. Elements that are not objects
/// or that miss a required field are dropped.
pub fn decode_entries(text: &str) -> std::result::Result<Vec<TravelEntry>, serde_json::Error> {
    let raw: Vec<Value> = serde_json::from_str(text)?;

    Ok(raw
        .into_iter()
        .filter_map(|value| serde_json::from_value::<StoredEntry>(value).ok())
        .filter_map(StoredEntry::into_entry)
        .collect())
}

/// Encode a collection for persistence
pub fn encode_entries(entries: &[TravelEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}
