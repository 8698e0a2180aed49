#![allow(dead_code)]

//! In-process mock of the dashboard backend.
//!
//! Each test spawns its own axum server on an ephemeral port. The server
//! keeps its records in memory, merges PATCH bodies into stored records and
//! records every request it sees.

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use hydro_dashboard::domain::Session;
use hydro_dashboard::infrastructure::http::ApiClient;
use hydro_dashboard::infrastructure::session::MemoryTokenStore;

/// Token the mock backend accepts for `/users`.
pub const TEST_TOKEN: &str = "test-token-7f3a";

const CREATED_AT: &str = "2024-03-01T08:00:00Z";

/// One request as seen by the backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

/// Multipart field received by the backend.
#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct BackendState {
    next_id: AtomicI64,
    pub requests: Mutex<Vec<RecordedRequest>>,
    pub contacts: Mutex<BTreeMap<i64, Value>>,
    pub incidents: Mutex<Vec<Value>>,
    pub devices: Mutex<BTreeMap<i64, Value>>,
    pub users: Mutex<BTreeMap<i64, Value>>,
    pub last_multipart: Mutex<Vec<ReceivedPart>>,
}

impl BackendState {
    fn seeded() -> Self {
        let state = Self {
            next_id: AtomicI64::new(100),
            ..Self::default()
        };

        state.contacts.lock().unwrap().insert(
            1,
            json!({
                "id": 1,
                "full_name": "Dilnoza Karimova",
                "position": "Chief dispatcher",
                "organization": "Charvak HPP",
                "phone": "+998 71 200-00-01",
                "email": "dispatch@charvak.example",
                "created_at": CREATED_AT,
                "updated_at": null
            }),
        );

        state.incidents.lock().unwrap().push(json!({
            "id": 10,
            "organization_id": 3,
            "organization_name": "Farhad HPP",
            "description": "Unit 2 tripped on overcurrent",
            "incident_time": "2024-03-04T22:15:00Z",
            "is_shutdown": true,
            "additional_note": null,
            "created_at": "2024-03-04T22:30:00Z"
        }));

        state.devices.lock().unwrap().insert(
            5,
            json!({
                "id": 5,
                "organization_name": "Andijan reservoir",
                "count_installed": 12,
                "count_working": 10,
                "count_faulty": 2,
                "updated_at": CREATED_AT
            }),
        );

        state
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Requests whose path ends with `suffix`.
    pub fn requests_to(&self, suffix: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path.ends_with(suffix))
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Running mock backend.
pub struct TestBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
    handle: JoinHandle<()>,
}

impl TestBackend {
    pub async fn spawn() -> Self {
        let state = Arc::new(BackendState::seeded());
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
            handle,
        }
    }

    /// Client without a stored token.
    pub fn client(&self) -> ApiClient {
        self.client_with(Session::new(Arc::new(MemoryTokenStore::new())))
    }

    /// Client whose session already holds [`TEST_TOKEN`].
    pub fn signed_in_client(&self) -> ApiClient {
        let store = MemoryTokenStore::with_value(hydro_dashboard::domain::TOKEN_KEY, TEST_TOKEN);
        self.client_with(Session::new(Arc::new(store)))
    }

    pub fn client_with(&self, session: Session) -> ApiClient {
        ApiClient::new(&self.base_url, Duration::from_secs(5), session).unwrap()
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

type Shared = State<Arc<BackendState>>;

fn router(state: Arc<BackendState>) -> Router {
    let api = Router::new()
        .route("/calendar/events", get(calendar_events))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
        .route("/incidents", get(list_incidents).post(create_incident))
        .route("/past-events", get(past_events_by_date))
        .route("/past-events/by-type", get(past_events_by_type))
        .route("/reservoir-summary", get(reservoir_summary))
        .route("/reservoir-device", get(list_devices).patch(update_devices))
        .route("/snow-cover", get(snow_cover))
        .route("/news", get(news))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/broken", get(broken))
        .route("/malformed", get(malformed))
        .route("/slow", get(slow));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): Shared, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.requests.lock().unwrap().push(recorded);
    next.run(request).await
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
}

fn unprocessable(message: &str, field: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": message, "errors": { field: [message] } })),
    )
        .into_response()
}

fn merge(target: &mut Value, patch: Map<String, Value>) {
    if let Value::Object(fields) = target {
        for (key, value) in patch {
            fields.insert(key, value);
        }
    }
}

// ─── Contacts ────────────────────────────────────────────────────────────────

async fn list_contacts(
    State(state): Shared,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.get("search").is_some_and(|term| term.len() > 100) {
        return unprocessable("The search may not be greater than 100 characters.", "search");
    }
    let contacts = state.contacts.lock().unwrap();
    let items: Vec<Value> = contacts
        .values()
        .filter(|c| match query.get("search") {
            Some(term) => c["full_name"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&term.to_lowercase())),
            None => true,
        })
        .cloned()
        .collect();
    Json(json!({ "data": items })).into_response()
}

async fn get_contact(State(state): Shared, Path(id): Path<i64>) -> Response {
    match state.contacts.lock().unwrap().get(&id) {
        Some(contact) => Json(contact.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_contact(State(state): Shared, Json(mut body): Json<Map<String, Value>>) -> Response {
    let mut contacts = state.contacts.lock().unwrap();

    let email = body.get("email").cloned().unwrap_or(Value::Null);
    if !email.is_null() && contacts.values().any(|c| c["email"] == email) {
        return unprocessable("The email has already been taken.", "email");
    }

    let id = state.next_id();
    body.insert("id".to_string(), json!(id));
    body.insert("created_at".to_string(), json!(CREATED_AT));
    body.insert("updated_at".to_string(), Value::Null);
    body.entry("organization").or_insert(Value::Null);
    body.entry("email").or_insert(Value::Null);

    let contact = Value::Object(body);
    contacts.insert(id, contact.clone());
    (StatusCode::CREATED, Json(contact)).into_response()
}

async fn update_contact(
    State(state): Shared,
    Path(id): Path<i64>,
    Json(patch): Json<Map<String, Value>>,
) -> Response {
    let mut contacts = state.contacts.lock().unwrap();
    let Some(contact) = contacts.get_mut(&id) else {
        return not_found();
    };
    merge(contact, patch);
    contact["updated_at"] = json!("2024-03-02T09:00:00Z");
    Json(contact.clone()).into_response()
}

async fn delete_contact(State(state): Shared, Path(id): Path<i64>) -> Response {
    match state.contacts.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ─── Incidents ───────────────────────────────────────────────────────────────

async fn list_incidents(
    State(state): Shared,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let incidents = state.incidents.lock().unwrap();
    let items: Vec<Value> = incidents
        .iter()
        .filter(|i| {
            let day = i["incident_time"]
                .as_str()
                .map_or("", |time| time.get(..10).unwrap_or(time));
            query.get("date").is_none_or(|date| day == date)
                && query.get("start_date").is_none_or(|start| day >= start.as_str())
                && query.get("end_date").is_none_or(|end| day <= end.as_str())
        })
        .cloned()
        .collect();
    Json(Value::Array(items)).into_response()
}

async fn create_incident(State(state): Shared, Json(mut body): Json<Map<String, Value>>) -> Response {
    let id = state.next_id();
    body.insert("id".to_string(), json!(id));
    body.insert("organization_name".to_string(), json!("Farhad HPP"));
    body.insert("created_at".to_string(), json!(CREATED_AT));

    let incident = Value::Object(body);
    state.incidents.lock().unwrap().push(incident.clone());
    (StatusCode::CREATED, Json(incident)).into_response()
}

// ─── Read-only panels ────────────────────────────────────────────────────────

async fn calendar_events(Query(query): Query<HashMap<String, String>>) -> Response {
    let year: i32 = query.get("year").and_then(|y| y.parse().ok()).unwrap_or(0);
    let month: u32 = query.get("month").and_then(|m| m.parse().ok()).unwrap_or(0);
    Json(json!({
        "year": year,
        "month": month,
        "days": [
            { "date": format!("{year}-{month:02}-04"), "incidents": 1, "shutdowns": 1 },
            { "date": format!("{year}-{month:02}-05"), "incidents": 0, "shutdowns": 0, "discharges": 0, "visits": 0 },
            { "date": format!("{year}-{month:02}-12"), "discharges": 2, "visits": 1 }
        ]
    }))
    .into_response()
}

async fn past_events_by_date(Query(query): Query<HashMap<String, String>>) -> Response {
    let Some(date) = query.get("date") else {
        return unprocessable("The date field is required.", "date");
    };
    Json(json!([{
        "date": date,
        "events": [{
            "id": 1,
            "type": "discharge",
            "organization_name": "Charvak HPP",
            "description": "Spillway opened",
            "occurred_at": format!("{date}T06:00:00Z")
        }]
    }]))
    .into_response()
}

async fn past_events_by_type(Query(query): Query<HashMap<String, String>>) -> Response {
    let Some(date) = query.get("date") else {
        return unprocessable("The date field is required.", "date");
    };
    let event_type = query.get("type").cloned().unwrap_or_else(|| "visit".to_string());
    Json(json!([{
        "type": event_type,
        "events": [{
            "id": 2,
            "type": event_type,
            "organization_name": "Tuyamuyun HPP",
            "description": "Delegation visit",
            "occurred_at": format!("{date}T11:30:00Z")
        }]
    }]))
    .into_response()
}

async fn reservoir_summary(Query(query): Query<HashMap<String, String>>) -> Response {
    let Some(date) = query.get("date") else {
        return unprocessable("The date field is required.", "date");
    };
    Json(json!([
        {
            "organization_id": 1,
            "organization_name": "Charvak HPP",
            "date": date,
            "level": 870.4,
            "volume": "1502.00",
            "income": 95.5,
            "release": 80.5
        },
        {
            "organization_id": 2,
            "organization_name": "Andijan reservoir",
            "date": date,
            "level": null
        }
    ]))
    .into_response()
}

async fn snow_cover(Query(query): Query<HashMap<String, String>>) -> Response {
    let date = query
        .get("date")
        .cloned()
        .unwrap_or_else(|| "2024-03-05".to_string());
    Json(json!({
        "today": { "date": date, "basins": [{ "name": "Chirchiq", "cover": 41.5 }, { "name": "Naryn", "cover": 63.0 }] },
        "yesterday": { "date": "2024-03-04", "basins": [{ "name": "Chirchiq", "cover": 43.0 }] },
        "year_ago": null
    }))
    .into_response()
}

async fn news(Query(query): Query<HashMap<String, String>>) -> Response {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let next = (page < 3).then(|| format!("/api/news?page={}", page + 1));
    Json(json!({
        "data": [{
            "id": i64::from(page) * 10,
            "title": format!("Bulletin {page}"),
            "short_description": null,
            "image": null,
            "published_at": "2024-03-05T07:00:00Z"
        }],
        "meta": { "total": 3, "last_page": 3, "current_page": page, "per_page": 1 },
        "links": { "self": format!("/api/news?page={page}"), "next": next, "last": "/api/news?page=3" }
    }))
    .into_response()
}

// ─── Reservoir devices ───────────────────────────────────────────────────────

async fn list_devices(State(state): Shared) -> Response {
    let devices: Vec<Value> = state.devices.lock().unwrap().values().cloned().collect();
    Json(Value::Array(devices)).into_response()
}

async fn update_devices(State(state): Shared, Json(body): Json<Value>) -> Response {
    let Some(updates) = body["devices"].as_array() else {
        return unprocessable("The devices field is required.", "devices");
    };

    let mut devices = state.devices.lock().unwrap();
    for update in updates {
        let Some(id) = update["id"].as_i64() else {
            return unprocessable("Each device needs an id.", "devices");
        };
        let Some(device) = devices.get_mut(&id) else {
            return not_found();
        };
        if let Value::Object(fields) = update.clone() {
            merge(device, fields);
        }
    }
    Json(json!({ "message": "Devices updated" })).into_response()
}

// ─── Users ───────────────────────────────────────────────────────────────────

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TEST_TOKEN}"))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." }))).into_response()
}

async fn read_parts(state: &BackendState, mut multipart: Multipart) -> Map<String, Value> {
    let mut parts = Vec::new();
    let mut fields = Map::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap().to_vec();

        if name == "avatar" {
            let stored = format!("/storage/avatars/{}", file_name.clone().unwrap_or_default());
            fields.insert("avatar".to_string(), json!(stored));
        } else if name != "password" {
            fields.insert(name.clone(), json!(String::from_utf8_lossy(&bytes)));
        }

        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    *state.last_multipart.lock().unwrap() = parts;
    fields
}

async fn list_users(State(state): Shared, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let users: Vec<Value> = state.users.lock().unwrap().values().cloned().collect();
    Json(Value::Array(users)).into_response()
}

async fn get_user(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match state.users.lock().unwrap().get(&id) {
        Some(user) => Json(user.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_user(State(state): Shared, headers: HeaderMap, multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let mut user = read_parts(&state, multipart).await;
    let id = state.next_id();
    user.insert("id".to_string(), json!(id));
    user.insert("created_at".to_string(), json!(CREATED_AT));
    user.entry("email").or_insert(Value::Null);
    user.entry("avatar").or_insert(Value::Null);

    let user = Value::Object(user);
    state.users.lock().unwrap().insert(id, user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let patch = read_parts(&state, multipart).await;
    let mut users = state.users.lock().unwrap();
    let Some(user) = users.get_mut(&id) else {
        return not_found();
    };
    merge(user, patch);
    Json(user.clone()).into_response()
}

async fn delete_user(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match state.users.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ─── Failure modes ───────────────────────────────────────────────────────────

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "database connection lost").into_response()
}

async fn malformed() -> Response {
    Json(json!({ "unexpected": true })).into_response()
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!([])).into_response()
}
