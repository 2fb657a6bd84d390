//! How a UI callback's arguments become a dispatched payload.
//!
//! Each [`Descriptor`] preset matches one integration pattern: plain
//! arguments, a text input change, an HTTP callback `(error, response)`, or a
//! chart click. A preset handed input of a different shape falls back to that
//! input's own payload.
use crate::{Action, ActionDispatcher, Payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTarget {
    pub id: String,
    pub value: String,
}

/// Input-change event as delivered by a text box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub target: EventTarget,
}

impl InputEvent {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: EventTarget {
                id: id.into(),
                value: value.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Payload,
}

impl HttpResponse {
    pub fn new(status: u16, body: Payload) -> Self {
        Self { status, body }
    }
}

/// Arguments a handler is invoked with.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerArgs {
    Payload(Payload),
    InputEvent(InputEvent),
    HttpResponse {
        error: Option<String>,
        response: Option<HttpResponse>,
    },
    ChartEntry {
        entry: Payload,
        index: usize,
    },
}

impl HandlerArgs {
    pub fn response(error: Option<String>, response: Option<HttpResponse>) -> Self {
        HandlerArgs::HttpResponse { error, response }
    }

    pub fn chart_entry(entry: Payload, index: usize) -> Self {
        HandlerArgs::ChartEntry { entry, index }
    }

    fn shape_name(&self) -> &'static str {
        match self {
            HandlerArgs::Payload(_) => "payload",
            HandlerArgs::InputEvent(_) => "input_event",
            HandlerArgs::HttpResponse { .. } => "http_response",
            HandlerArgs::ChartEntry { .. } => "chart_entry",
        }
    }

    /// The payload this input naturally produces.
    pub fn into_payload(self) -> Payload {
        match self {
            HandlerArgs::Payload(payload) => payload,
            HandlerArgs::InputEvent(event) => {
                let mut payload = Payload::new();
                payload.insert("id".to_string(), Value::String(event.target.id));
                payload.insert("value".to_string(), Value::String(event.target.value));
                payload
            }
            HandlerArgs::HttpResponse { error, response } => {
                let mut payload = response
                    .as_ref()
                    .map(|response| response.body.clone())
                    .unwrap_or_default();
                payload.insert(
                    "error".to_string(),
                    error.map(Value::String).unwrap_or(Value::Null),
                );
                let response = match response {
                    Some(response) => serde_json::to_value(response)
                        .unwrap_or_else(|_| Value::Object(Payload::new())),
                    None => Value::Object(Payload::new()),
                };
                payload.insert("response".to_string(), response);
                payload
            }
            // Index is positional noise from the chart library.
            HandlerArgs::ChartEntry { entry, .. } => entry,
        }
    }
}

impl From<Payload> for HandlerArgs {
    fn from(value: Payload) -> Self {
        HandlerArgs::Payload(value)
    }
}

impl From<InputEvent> for HandlerArgs {
    fn from(value: InputEvent) -> Self {
        HandlerArgs::InputEvent(value)
    }
}

impl From<HttpResponse> for HandlerArgs {
    fn from(value: HttpResponse) -> Self {
        HandlerArgs::response(None, Some(value))
    }
}

pub type CustomDispatcher = Arc<dyn Fn(&ActionDispatcher, &Action, HandlerArgs) + Send + Sync>;

#[derive(Clone, Default)]
pub enum Descriptor {
    /// Payload is the supplied arguments verbatim.
    #[default]
    Default,
    /// `{ id, value }` taken from the event target.
    FromInputEvent,
    /// Response body fields, plus `error` and the raw `response`.
    FromHttpResponse,
    /// The chart data point; index is ignored.
    FromChartEntry,
    Custom(CustomDispatcher),
}

impl Descriptor {
    pub fn custom(
        dispatcher: impl Fn(&ActionDispatcher, &Action, HandlerArgs) + Send + Sync + 'static,
    ) -> Self {
        Descriptor::Custom(Arc::new(dispatcher))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Descriptor::Default => "default",
            Descriptor::FromInputEvent => "from_input_event",
            Descriptor::FromHttpResponse => "from_http_response",
            Descriptor::FromChartEntry => "from_chart_entry",
            Descriptor::Custom(_) => "custom",
        }
    }

    /// Shape `args` into a payload. Not used for [`Descriptor::Custom`].
    pub fn shape(&self, args: HandlerArgs) -> Payload {
        let expected = match self {
            Descriptor::Default | Descriptor::Custom(_) => None,
            Descriptor::FromInputEvent => Some("input_event"),
            Descriptor::FromHttpResponse => Some("http_response"),
            Descriptor::FromChartEntry => Some("chart_entry"),
        };
        let actual = args.shape_name();
        if expected.is_some_and(|expected| expected != actual) {
            tracing::debug!(
                descriptor = self.name(),
                expected = expected.unwrap_or_default(),
                actual,
                "handler input shape mismatch; using input payload"
            );
        }
        args.into_payload()
    }
}

impl std::fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn default_passes_payload_verbatim() {
        let payload = object(json!({ "value": "x", "nested": { "a": 1 } }));
        let shaped = Descriptor::Default.shape(payload.clone().into());
        assert_eq!(shaped, payload);
    }

    #[test]
    fn input_event_extracts_id_and_value() {
        let shaped = Descriptor::FromInputEvent.shape(InputEvent::new("name", "ada").into());
        assert_eq!(Value::Object(shaped), json!({ "id": "name", "value": "ada" }));
    }

    #[test]
    fn http_response_spreads_body() {
        let response = HttpResponse::new(200, object(json!({ "items": [1, 2], "total": 2 })));
        let shaped = Descriptor::FromHttpResponse.shape(response.into());
        assert_eq!(
            Value::Object(shaped),
            json!({
                "items": [1, 2],
                "total": 2,
                "error": null,
                "response": { "status": 200, "body": { "items": [1, 2], "total": 2 } }
            })
        );
    }

    #[test]
    fn http_error_without_response() {
        let shaped = Descriptor::FromHttpResponse
            .shape(HandlerArgs::response(Some("timeout".to_string()), None));
        assert_eq!(
            Value::Object(shaped),
            json!({ "error": "timeout", "response": {} })
        );
    }

    #[test]
    fn chart_entry_ignores_index() {
        let entry = object(json!({ "name": "cpu", "value": 42 }));
        let shaped = Descriptor::FromChartEntry.shape(HandlerArgs::chart_entry(entry.clone(), 3));
        assert_eq!(shaped, entry);
    }

    #[test]
    fn mismatched_input_uses_its_own_payload() {
        let shaped = Descriptor::FromChartEntry.shape(InputEvent::new("q", "rust").into());
        assert_eq!(Value::Object(shaped), json!({ "id": "q", "value": "rust" }));
    }

    #[test]
    fn descriptor_debug_names() {
        assert_eq!(format!("{:?}", Descriptor::default()), "default");
        assert_eq!(format!("{:?}", Descriptor::custom(|_, _, _| {})), "custom");
    }
}
