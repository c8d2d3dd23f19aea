//! `ApiClient` against a canned `tiny_http` backend.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use alum_config::ApiConfig;
use alum_core::entities::Event;
use alum_core::state::{KEY_AUTH_TOKEN, KeyValueStore};
use alum_http::{ApiClient, Endpoints, ListQuery, SortDirection};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    url: String,
    authorization: Option<String>,
    body: String,
}

struct Canned {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl Canned {
    fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: body.to_string(),
        }
    }

    fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

struct FakeBackend {
    base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeBackend {
    /// Serve `responses` in order, one per request, then stop.
    fn spawn(responses: Vec<Canned>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        let handle = std::thread::spawn(move || {
            for canned in responses {
                let Ok(mut request) = server.recv() else { return };
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).unwrap();
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                log.lock().unwrap().push(Seen {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    authorization,
                    body,
                });

                let mut response =
                    tiny_http::Response::from_string(canned.body).with_status_code(canned.status);
                for (name, value) in canned.headers {
                    response = response.with_header(
                        tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap(),
                    );
                }
                request.respond(response).unwrap();
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            seen,
            handle: Some(handle),
        }
    }

    fn client(&self, store: Option<Arc<dyn KeyValueStore>>) -> ApiClient {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, store).unwrap()
    }

    fn finish(mut self) -> Vec<Seen> {
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
        self.seen.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct MapStore(Mutex<HashMap<String, String>>);

impl KeyValueStore for MapStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.0.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.0.lock().unwrap().remove(key);
    }
}

#[tokio::test]
async fn envelope_is_unwrapped_and_bearer_injected() {
    let backend = FakeBackend::spawn(vec![Canned::json(
        200,
        &json!({"success": true, "data": {"id": "evt-1", "title": "Homecoming", "capacity": 100}}),
    )]);
    let store = Arc::new(MapStore::default());
    store.set_item(KEY_AUTH_TOKEN, "tok-123");

    let event: Event = backend
        .client(Some(store))
        .get(&Endpoints::EVENTS.by_id("evt-1"))
        .await
        .unwrap();
    assert_eq!(event.id, "evt-1");
    assert_eq!(event.title, "Homecoming");
    assert_eq!(event.capacity, 100);

    let seen = backend.finish();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].url, "/api/events/evt-1");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn empty_token_is_not_sent() {
    let backend = FakeBackend::spawn(vec![Canned::json(200, &json!({"status": "ok"}))]);
    let store = Arc::new(MapStore::default());
    store.set_item(KEY_AUTH_TOKEN, "");

    let _: Value = backend
        .client(Some(store))
        .get(Endpoints::HEALTH)
        .await
        .unwrap();
    assert_eq!(backend.finish()[0].authorization, None);
}

#[tokio::test]
async fn bare_list_uses_total_count_header() {
    let backend = FakeBackend::spawn(vec![
        Canned::json(200, &json!([{"id": "evt-3"}, {"id": "evt-4"}])).header("X-Total-Count", "7"),
    ]);
    let query = ListQuery::new(2, 2)
        .with_filter("status", "published")
        .with_sort("startDate", SortDirection::Asc);

    let page = backend
        .client(None)
        .get_list::<Event>(Endpoints::EVENTS.base(), &query)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 7);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 4);

    let seen = backend.finish();
    assert_eq!(
        seen[0].url,
        "/api/events?_page=2&_limit=2&_sort=startDate&_order=asc&status=published"
    );
}

#[tokio::test]
async fn unpaginated_bare_list_is_sliced_locally() {
    let all: Vec<Value> = (1..=5).map(|i| json!({"id": format!("evt-{i}")})).collect();
    let backend = FakeBackend::spawn(vec![Canned::json(200, &Value::Array(all))]);

    let page = backend
        .client(None)
        .get_list::<Event>(Endpoints::EVENTS.base(), &ListQuery::new(3, 2))
        .await
        .unwrap();
    let ids: Vec<_> = page.items.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["evt-5"]);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    backend.finish();
}

#[tokio::test]
async fn not_found_maps_to_404() {
    let backend = FakeBackend::spawn(vec![Canned::json(
        404,
        &json!({"success": false, "error": {"code": 404, "message": "Event not found"}}),
    )]);
    let err = backend
        .client(None)
        .get::<Event>(&Endpoints::EVENTS.by_id("missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message, "Event not found");
    backend.finish();
}

#[tokio::test]
async fn failed_envelope_with_200_status_is_an_error() {
    let backend = FakeBackend::spawn(vec![Canned::json(
        200,
        &json!({"success": false, "error": {"code": 409, "message": "Event is full"}}),
    )]);
    let err = backend
        .client(None)
        .post::<_, Event>(
            &Endpoints::EVENTS.action("evt-1", "register"),
            &json!({"userId": "usr-1"}),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, 409);

    let seen = backend.finish();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(
        serde_json::from_str::<Value>(&seen[0].body).unwrap(),
        json!({"userId": "usr-1"})
    );
}

#[tokio::test]
async fn patch_and_delete() {
    let backend = FakeBackend::spawn(vec![
        Canned::json(200, &json!({"id": "evt-1", "status": "published"})),
        Canned {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        },
    ]);
    let client = backend.client(None);

    let event: Event = client
        .patch(&Endpoints::EVENTS.by_id("evt-1"), &json!({"status": "published"}))
        .await
        .unwrap();
    assert_eq!(event.status.as_str(), "published");
    client.delete(&Endpoints::EVENTS.by_id("evt-1")).await.unwrap();

    let methods: Vec<_> = backend.finish().into_iter().map(|s| s.method).collect();
    assert_eq!(methods, vec!["PATCH", "DELETE"]);
}
