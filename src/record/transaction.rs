//! # Transaction Record
//!
//! A single mobile-money transaction as stored and served.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::errors::{RecordError, RecordResult};
use super::validation::missing_fields;

/// One stored transaction
///
/// Serializes as a flat JSON object: the named fields first, then any
/// pass-through fields carried in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier, immutable once assigned
    pub id: u64,

    /// Transaction category
    #[serde(rename = "type")]
    pub kind: String,

    /// Amount as received; integer and decimal forms are preserved
    pub amount: Number,

    pub sender: String,

    pub receiver: String,

    /// Lexically sortable timestamp used for range filtering
    pub timestamp: String,

    /// Fields outside the required set
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Build a record from a create payload.
    ///
    /// Any `id` in the payload is discarded in favour of `id`.
    pub fn from_payload(id: u64, payload: Map<String, Value>) -> RecordResult<Self> {
        let missing = missing_fields(&payload);
        if !missing.is_empty() {
            return Err(RecordError::MissingFields(missing));
        }
        Self::from_object(id, payload)
    }

    /// Apply a partial update to a copy of this record.
    ///
    /// The `id` key is ignored. The result is re-checked with the same
    /// typing rules as a create, so `self` is never left half-updated.
    pub fn merge(&self, partial: &Map<String, Value>) -> RecordResult<Self> {
        let mut object = self.to_object();
        for (key, value) in partial {
            if key != "id" {
                object.insert(key.clone(), value.clone());
            }
        }
        Self::from_object(self.id, object)
    }

    /// Render as a JSON object
    pub fn to_object(&self) -> Map<String, Value> {
        let mut object = self.extra.clone();
        object.insert("id".to_string(), Value::from(self.id));
        object.insert("type".to_string(), Value::String(self.kind.clone()));
        object.insert("amount".to_string(), Value::Number(self.amount.clone()));
        object.insert("sender".to_string(), Value::String(self.sender.clone()));
        object.insert("receiver".to_string(), Value::String(self.receiver.clone()));
        object.insert("timestamp".to_string(), Value::String(self.timestamp.clone()));
        object
    }

    fn from_object(id: u64, mut object: Map<String, Value>) -> RecordResult<Self> {
        object.remove("id");

        let kind = take_string(&mut object, "type")?;
        let amount = match object.remove("amount") {
            Some(Value::Number(amount)) => amount,
            Some(_) => return Err(RecordError::InvalidField("amount")),
            None => return Err(RecordError::MissingFields(vec!["amount"])),
        };
        let sender = take_string(&mut object, "sender")?;
        let receiver = take_string(&mut object, "receiver")?;
        let timestamp = take_string(&mut object, "timestamp")?;

        Ok(Self {
            id,
            kind,
            amount,
            sender,
            receiver,
            timestamp,
            extra: object,
        })
    }
}

fn take_string(object: &mut Map<String, Value>, field: &'static str) -> RecordResult<String> {
    match object.remove(field) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(RecordError::InvalidField(field)),
        None => Err(RecordError::MissingFields(vec![field])),
    }
}
