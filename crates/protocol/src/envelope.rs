use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named event with an optional JSON payload, as carried by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Event {
    /// Creates an event with the given payload.
    pub fn new<T: Serialize>(
        event: impl Into<String>,
        payload: Option<&T>,
    ) -> Result<Self, serde_json::Error> {
        let payload = payload.map(serde_json::to_value).transpose()?;
        Ok(Self {
            event: event.into(),
            payload,
        })
    }

    /// Deserializes the payload into the given type.
    pub fn parse_payload<T: for<'de> Deserialize<'de>>(
        &self,
    ) -> Result<Option<T>, serde_json::Error> {
        match &self.payload {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    /// The payload, or JSON `null` when absent.
    pub fn payload_or_null(&self) -> Value {
        self.payload.clone().unwrap_or(Value::Null)
    }
}
