use reframed_store::{
    Action, ActionDispatcher, Descriptor, HandlerArgs, HttpResponse, InputEvent, Payload,
    Reducers, Router, Store,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Routes {
    visited: Mutex<Vec<String>>,
}

impl Router for Routes {
    fn navigate_to(&self, path: &str) {
        self.visited.lock().expect("visited lock").push(path.to_string());
    }
}

fn form(state: &Value, record: &Payload) -> Value {
    let mut fields = state.as_object().cloned().unwrap_or_default();
    if record.get("type").and_then(Value::as_str) == Some("FIELD_CHANGED") {
        let id = record.get("id").and_then(Value::as_str);
        if let (Some(id), Some(value)) = (id, record.get("value")) {
            fields.insert(id.to_string(), value.clone());
        }
    }
    Value::Object(fields)
}

fn orders(state: &Value, record: &Payload) -> Value {
    match record.get("type").and_then(Value::as_str) {
        Some("ORDERS_LOADED") => json!({
            "items": record.get("items").cloned().unwrap_or(json!([])),
            "error": record.get("error").cloned().unwrap_or(Value::Null),
        }),
        _ if state.is_null() => json!({ "items": [], "error": null }),
        _ => state.clone(),
    }
}

fn app() -> (Arc<Routes>, Arc<Store>, Arc<ActionDispatcher>) {
    let routes = Arc::new(Routes::default());
    let store = Arc::new(Store::new(
        Reducers::new().with("form", form).with("orders", orders),
    ));
    let dispatcher = Arc::new(ActionDispatcher::new(routes.clone(), store.clone()));
    (routes, store, dispatcher)
}

#[test]
fn navigation_never_touches_state() {
    let (routes, store, dispatcher) = app();
    let before = store.state();
    dispatcher.dispatch_action(&Action::navigate("/foo"), Payload::new());
    assert_eq!(*routes.visited.lock().expect("visited lock"), vec!["/foo"]);
    assert_eq!(store.state(), before);
}

#[test]
fn input_events_fill_the_form() {
    let (_, store, dispatcher) = app();
    let on_change =
        dispatcher.build_dispatcher(Action::new("FIELD_CHANGED"), Descriptor::FromInputEvent);
    on_change.invoke(InputEvent::new("first_name", "Ada"));
    on_change.invoke(InputEvent::new("last_name", "Lovelace"));
    assert_eq!(
        store.state()["form"],
        json!({ "first_name": "Ada", "last_name": "Lovelace" })
    );
}

#[test]
fn http_callback_loads_orders_and_errors() {
    let (_, store, dispatcher) = app();
    let on_loaded =
        dispatcher.build_dispatcher(Action::new("ORDERS_LOADED"), Descriptor::FromHttpResponse);

    let mut body = Payload::new();
    body.insert("items".to_string(), json!([{ "id": 1 }, { "id": 2 }]));
    on_loaded.invoke(HttpResponse::new(200, body));
    assert_eq!(
        store.state()["orders"],
        json!({ "items": [{ "id": 1 }, { "id": 2 }], "error": null })
    );

    on_loaded.invoke(HandlerArgs::response(Some("503".to_string()), None));
    assert_eq!(store.state()["orders"], json!({ "items": [], "error": "503" }));
}

#[test]
fn records_apply_in_call_order() {
    let (_, store, dispatcher) = app();
    let set = |value: &str| {
        let mut args = Payload::new();
        args.insert("id".to_string(), json!("status"));
        args.insert("value".to_string(), json!(value));
        dispatcher.dispatch_action(&Action::new("FIELD_CHANGED"), args);
    };
    set("draft");
    set("review");
    set("published");
    assert_eq!(store.state()["form"]["status"], json!("published"));
}
