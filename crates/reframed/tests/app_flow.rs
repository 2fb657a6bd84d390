use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reframed::{
    Action, AppContext, Config, Descriptor, InputEvent, MemorySessionStorage, Payload,
    PermissionTable, Reducers, RoleTable, Router, SessionStorage,
};
use serde_json::{Value, json};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
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

impl Routes {
    fn visited(&self) -> Vec<String> {
        self.visited.lock().expect("visited lock").clone()
    }
}

fn search(state: &Value, record: &Payload) -> Value {
    match record.get("type").and_then(Value::as_str) {
        Some("SET_QUERY") => record.get("value").cloned().unwrap_or(Value::Null),
        _ if state.is_null() => json!(""),
        _ => state.clone(),
    }
}

fn token(role: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({ "role": role }),
        &EncodingKey::from_secret(b"server-secret"),
    )
    .expect("encode token")
}

fn app(config: Config) -> (Arc<Routes>, AppContext) {
    let routes = Arc::new(Routes::default());
    let app = AppContext::new(
        config,
        MemorySessionStorage::new(),
        Reducers::new().with("search", search),
        routes.clone(),
    );
    (routes, app)
}

#[test]
fn fresh_context_has_no_session() {
    let (_, app) = app(Config::default());
    assert_eq!(app.authz().token(), "");
    assert!(app.authz().tables().roles.is_empty());
    assert_eq!(app.store().state(), json!({ "search": "" }));
}

#[test]
fn guard_redirects_through_router() {
    let (routes, app) = app(Config::default());
    assert!(!app.enforce_authorization("/orders?status=open"));
    assert_eq!(routes.visited(), vec!["/login?redirect=%2Forders%3Fstatus%3Dopen"]);

    app.authz().set_token(token("user"));
    assert!(app.enforce_authorization("/orders?status=open"));
    assert_eq!(routes.visited().len(), 1);
}

#[test]
fn configured_login_path_and_token_key() {
    let config = Config {
        login_path: "/signin".to_string(),
        session_token_key: "jwt".to_string(),
        ..Config::default()
    };
    let storage = Arc::new(MemorySessionStorage::new());
    let routes = Arc::new(Routes::default());
    let app = AppContext::new(config, storage.clone(), Reducers::new(), routes.clone());

    app.enforce_authorization("/");
    assert_eq!(routes.visited(), vec!["/signin?redirect=%2F"]);
    app.authz().set_token("abc");
    assert_eq!(storage.get("jwt").as_deref(), Some("abc"));
}

#[test]
fn handlers_update_state_and_permissions_gate_views() {
    let (_, app) = app(Config::default());
    app.authz().set_roles_and_permissions(
        RoleTable::new(["admin", "user"]),
        PermissionTable::new().with_permission("search.advanced", ["Y", "N"]),
    );

    let on_query = app.handler(Action::new("SET_QUERY"), Descriptor::FromInputEvent);
    on_query.invoke(InputEvent::new("query", "rust"));
    assert_eq!(app.store().state()["search"], json!("rust"));

    app.authz().set_token(token("admin"));
    assert!(app.authz().has_permission("search.advanced"));
    app.authz().set_token(token("user"));
    assert!(!app.authz().has_permission("search.advanced"));
}

#[test]
fn end_session_clears_token_but_keeps_state() {
    let (_, app) = app(Config::default());
    app.authz().set_token(token("admin"));
    app.handler(Action::new("SET_QUERY"), Descriptor::default())
        .invoke(Payload::from_iter([("value".to_string(), json!("kept"))]));
    app.end_session();
    assert!(!app.authz().is_authenticated());
    assert_eq!(app.store().state()["search"], json!("kept"));
}

#[test]
fn listener_sees_initial_and_later_states() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let app = AppContext::with_listener(
        Config::default(),
        MemorySessionStorage::new(),
        Reducers::new().with("search", search),
        Arc::new(Routes::default()),
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    app.dispatcher()
        .dispatch_action(&Action::new("SET_QUERY"), Payload::new());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
#[serial]
fn from_env_applies_environment() {
    unsafe {
        std::env::remove_var("REFRAMED_CONFIG");
        std::env::set_var("REFRAMED_LOGIN_PATH", "/auth");
    }
    let routes = Arc::new(Routes::default());
    let app = AppContext::from_env(MemorySessionStorage::new(), Reducers::new(), routes.clone())
        .expect("context from env");
    assert_eq!(app.config().login_path, "/auth");
    app.enforce_authorization("/x");
    assert_eq!(routes.visited(), vec!["/auth?redirect=%2Fx"]);
    unsafe { std::env::remove_var("REFRAMED_LOGIN_PATH") };
}
