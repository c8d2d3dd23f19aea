//! A local JSON document server in the json-server mould.
//!
//! The whole database is one JSON object of named arrays. Routes:
//!
//! | Method | Path | Effect |
//! |---|---|---|
//! | GET | `/db` | whole document |
//! | GET | `/{collection}` | list; `_page`, `_limit`, `_sort`, `_order`, `q`, field filters; `X-Total-Count` |
//! | GET | `/{collection}/{id}` | one record or 404 |
//! | POST | `/{collection}` | insert; assigns an id when absent, 409 on duplicates |
//! | PUT | `/{collection}/{id}` | replace (id kept) |
//! | PATCH | `/{collection}/{id}` | shallow merge |
//! | DELETE | `/{collection}/{id}` | remove |
//!
//! Unknown collections read as empty and are created on first insert.

use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use alum_core::ids::{generate_id, prefix_for_collection};
use alum_http::SortDirection;
use serde_json::{Map, Value, json};

use crate::error::MockError;
use crate::query::{Filters, filter_items, paginate_items, sort_items};

/// Bundled demo document served by `MockServer::demo`.
pub const DEMO_SEED: &str = include_str!("../data/db.json");

/// json-server's page size when only `_page` is given.
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
struct Reply {
    status: u16,
    body: Value,
    total_count: Option<usize>,
}

impl Reply {
    const fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            total_count: None,
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": message.into() }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other,
}

impl From<&tiny_http::Method> for Verb {
    fn from(method: &tiny_http::Method) -> Self {
        match method {
            tiny_http::Method::Get => Self::Get,
            tiny_http::Method::Post => Self::Post,
            tiny_http::Method::Put => Self::Put,
            tiny_http::Method::Patch => Self::Patch,
            tiny_http::Method::Delete => Self::Delete,
            _ => Self::Other,
        }
    }
}

struct Database {
    collections: Mutex<Map<String, Value>>,
    write_back: Option<PathBuf>,
    requests: AtomicUsize,
}

impl Database {
    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.collections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, collections: &Map<String, Value>) {
        let Some(path) = &self.write_back else { return };
        let result = serde_json::to_string_pretty(collections)
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(path, json));
        if let Err(error) = result {
            tracing::warn!(path = %path.display(), %error, "mock server write-back failed");
        }
    }

    fn handle(&self, verb: Verb, url: &str, body: &str) -> Reply {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect();

        match (verb, segments.as_slice()) {
            (Verb::Get, []) => {
                let names: Vec<String> = self.lock().keys().cloned().collect();
                Reply::new(200, json!({ "collections": names }))
            }
            (Verb::Get, [db]) if db == "db" => Reply::new(200, Value::Object(self.lock().clone())),
            (Verb::Get, [collection]) => self.list(collection, query),
            (Verb::Post, [collection]) => match parse_object(body) {
                Ok(record) => self.insert(collection, record),
                Err(reply) => reply,
            },
            (Verb::Get, [collection, id]) => self.find(collection, id),
            (Verb::Put | Verb::Patch, [collection, id]) => match parse_object(body) {
                Ok(fields) => self.update(collection, id, fields, verb == Verb::Patch),
                Err(reply) => reply,
            },
            (Verb::Delete, [collection, id]) => self.remove(collection, id),
            (Verb::Other, _) => Reply::error(405, "method not allowed"),
            _ => Reply::error(404, format!("no route for {path}")),
        }
    }

    fn list(&self, collection: &str, query: &str) -> Reply {
        let items = self
            .lock()
            .get(collection)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut filters = Filters::new();
        let (mut page, mut limit, mut sort, mut order) = (None, None, None, SortDirection::Asc);
        for (key, value) in parse_query(query) {
            match key.as_str() {
                "_page" => page = value.parse::<usize>().ok(),
                "_limit" => limit = value.parse::<usize>().ok(),
                "_sort" => sort = Some(value),
                "_order" => order = value.parse().unwrap_or(SortDirection::Asc),
                k if k.starts_with('_') => {}
                _ => {
                    filters.insert(key, Value::String(value));
                }
            }
        }

        let mut matched = filter_items(&items, &filters);
        if let Some(field) = sort {
            matched = sort_items(&matched, &field, order);
        }
        let total = matched.len();
        let body = if page.is_some() || limit.is_some() {
            paginate_items(
                &matched,
                page.unwrap_or(1),
                limit.unwrap_or(DEFAULT_PAGE_SIZE),
            )
            .items
        } else {
            matched
        };

        Reply {
            status: 200,
            body: Value::Array(body),
            total_count: Some(total),
        }
    }

    fn find(&self, collection: &str, id: &str) -> Reply {
        self.lock()
            .get(collection)
            .and_then(Value::as_array)
            .and_then(|items| items.iter().find(|item| has_id(item, id)))
            .map_or_else(
                || Reply::error(404, format!("{collection}/{id} not found")),
                |item| Reply::new(200, item.clone()),
            )
    }

    fn insert(&self, collection: &str, mut record: Map<String, Value>) -> Reply {
        let id = match record.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                let id = generate_id(prefix_for_collection(collection));
                record.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };

        let mut db = self.lock();
        let items = db
            .entry(collection.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let Some(items) = items.as_array_mut() else {
            return Reply::error(500, format!("{collection} is not a collection"));
        };
        if items.iter().any(|item| has_id(item, &id)) {
            return Reply::error(409, format!("{collection}/{id} already exists"));
        }
        let record = Value::Object(record);
        items.push(record.clone());
        self.persist(&db);
        Reply::new(201, record)
    }

    fn update(&self, collection: &str, id: &str, fields: Map<String, Value>, merge: bool) -> Reply {
        let mut db = self.lock();
        let Some(item) = db
            .get_mut(collection)
            .and_then(Value::as_array_mut)
            .and_then(|items| items.iter_mut().find(|item| has_id(item, id)))
        else {
            return Reply::error(404, format!("{collection}/{id} not found"));
        };

        let original_id = item.get("id").cloned().unwrap_or_else(|| Value::String(id.to_string()));
        let mut next = if merge {
            item.as_object().cloned().unwrap_or_default()
        } else {
            Map::new()
        };
        next.extend(fields);
        next.insert("id".to_string(), original_id);
        *item = Value::Object(next);

        let reply = Reply::new(200, item.clone());
        self.persist(&db);
        reply
    }

    fn remove(&self, collection: &str, id: &str) -> Reply {
        let mut db = self.lock();
        let Some(items) = db.get_mut(collection).and_then(Value::as_array_mut) else {
            return Reply::error(404, format!("{collection}/{id} not found"));
        };
        let before = items.len();
        items.retain(|item| !has_id(item, id));
        if items.len() == before {
            return Reply::error(404, format!("{collection}/{id} not found"));
        }
        self.persist(&db);
        Reply::new(200, json!({}))
    }
}

fn has_id(item: &Value, id: &str) -> bool {
    match item.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

/// Percent-decode a path segment. `+` is literal in paths.
fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned)
}

/// Form-decode a query component: `+` is a space.
fn decode_component(raw: &str) -> String {
    decode_segment(&raw.replace('+', " "))
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn parse_object(body: &str) -> Result<Map<String, Value>, Reply> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Reply::error(400, "body must be a JSON object")),
        Err(e) => Err(Reply::error(400, format!("invalid JSON body: {e}"))),
    }
}

fn seed_collections(seed: Value) -> Result<Map<String, Value>, MockError> {
    match seed {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(MockError::SeedShape("an array")),
        Value::Null => Err(MockError::SeedShape("null")),
        _ => Err(MockError::SeedShape("a scalar")),
    }
}

fn respond(request: tiny_http::Request, reply: Reply) {
    let mut response =
        tiny_http::Response::from_string(reply.body.to_string()).with_status_code(reply.status);
    let mut headers = vec![("Content-Type", "application/json".to_string())];
    if let Some(total) = reply.total_count {
        headers.push(("X-Total-Count", total.to_string()));
        headers.push(("Access-Control-Expose-Headers", "X-Total-Count".to_string()));
    }
    for (name, value) in headers {
        if let Ok(header) = tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            response.add_header(header);
        }
    }
    if let Err(error) = request.respond(response) {
        tracing::debug!(%error, "mock server client went away");
    }
}

/// A running mock server. Stops when dropped.
pub struct MockServer {
    server: Arc<tiny_http::Server>,
    addr: SocketAddr,
    db: Arc<Database>,
    worker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for MockServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockServer")
            .field("addr", &self.addr)
            .field("write_back", &self.db.write_back)
            .finish_non_exhaustive()
    }
}

impl MockServer {
    /// Serve `seed` (an object of collections) on `addr`, e.g.
    /// `127.0.0.1:0` for an ephemeral port.
    ///
    /// # Errors
    ///
    /// [`MockError::SeedShape`] for a non-object seed, [`MockError::Bind`]
    /// when the address cannot be bound.
    pub fn start(seed: Value, addr: &str) -> Result<Self, MockError> {
        Self::spawn(seed_collections(seed)?, addr, None)
    }

    /// Serve the JSON document at `path`. With `write_back`, every
    /// successful write rewrites the file.
    ///
    /// # Errors
    ///
    /// I/O and parse errors for the file, plus those of [`Self::start`].
    pub fn from_file(path: &Path, addr: &str, write_back: bool) -> Result<Self, MockError> {
        let raw = std::fs::read_to_string(path).map_err(|source| MockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: Value = serde_json::from_str(&raw).map_err(|source| MockError::Seed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::spawn(
            seed_collections(seed)?,
            addr,
            write_back.then(|| path.to_path_buf()),
        )
    }

    /// Serve the bundled demo document.
    ///
    /// # Errors
    ///
    /// Same as [`Self::start`].
    pub fn demo(addr: &str) -> Result<Self, MockError> {
        let seed: Value = serde_json::from_str(DEMO_SEED).map_err(|source| MockError::Seed {
            path: PathBuf::from("data/db.json"),
            source,
        })?;
        Self::start(seed, addr)
    }

    fn spawn(
        collections: Map<String, Value>,
        addr: &str,
        write_back: Option<PathBuf>,
    ) -> Result<Self, MockError> {
        let server = tiny_http::Server::http(addr).map_err(|e| MockError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        let bound = server.server_addr().to_ip().ok_or_else(|| MockError::Bind {
            addr: addr.to_string(),
            reason: "not an IP listener".to_string(),
        })?;

        let server = Arc::new(server);
        let db = Arc::new(Database {
            collections: Mutex::new(collections),
            write_back,
            requests: AtomicUsize::new(0),
        });

        let worker = {
            let server = Arc::clone(&server);
            let db = Arc::clone(&db);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    db.requests.fetch_add(1, Ordering::SeqCst);
                    let mut body = String::new();
                    let reply = match request.as_reader().read_to_string(&mut body) {
                        Ok(_) => {
                            let verb = Verb::from(request.method());
                            db.handle(verb, request.url(), &body)
                        }
                        Err(e) => Reply::error(400, format!("unreadable body: {e}")),
                    };
                    tracing::debug!(
                        method = %request.method(),
                        url = request.url(),
                        status = reply.status,
                        "mock server request"
                    );
                    respond(request, reply);
                }
            })
        };

        tracing::debug!(%bound, "mock server listening");
        Ok(Self {
            server,
            addr: bound,
            db,
            worker: Some(worker),
        })
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests served so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.db.requests.load(Ordering::SeqCst)
    }

    pub fn reset_request_count(&self) {
        self.db.requests.store(0, Ordering::SeqCst);
    }

    /// Records of one collection.
    #[must_use]
    pub fn collection(&self, name: &str) -> Vec<Value> {
        self.db
            .lock()
            .get(name)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Block until the server stops (another handle unblocks it, or the
    /// process exits).
    pub fn wait(mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
