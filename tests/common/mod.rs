//! In-process mock of the movie REST backend.
//!
//! Mirrors the real server's routes under `/api/v1` and records the
//! `Authorization` header of every request so tests can assert on it.

#![allow(dead_code)]

use axum::extract::{Multipart, Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use cinedex::form::{MovieForm, PosterUpload};
use cinedex::form::{FieldPath, MovieField, PersonField};
use cinedex::ApiClient;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Debug, Default)]
pub struct Recorded {
    pub movies: Vec<Value>,
    pub next_id: u64,
    pub fail_fetch: bool,
    /// `(method path, Authorization header)` for every request, in order.
    pub requests: Vec<(String, Option<String>)>,
}

#[derive(Clone, Default)]
struct Shared(Arc<Mutex<Recorded>>);

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.0.lock().unwrap()
    }

    fn record(&self, what: String, headers: &HeaderMap) {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        self.lock().requests.push((what, auth));
    }
}

pub struct MockBackend {
    pub base_url: String,
    shared: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let api = Router::new()
            .route("/movies", get(list_movies).post(create_movie))
            .route("/movies/{id}", put(update_movie).delete(delete_movie))
            .route("/auth/login", post(login))
            .route("/auth/sign-up", post(signup))
            .with_state(shared.clone());
        let app = Router::new().nest("/api/v1", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            shared,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    pub fn state(&self) -> MutexGuard<'_, Recorded> {
        self.shared.lock()
    }

    pub fn seed(&self, names: &[&str]) {
        let mut state = self.state();
        for name in names {
            state.next_id += 1;
            let id = format!("m{}", state.next_id);
            state.movies.push(movie_json(&id, name));
        }
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.state().fail_fetch = fail;
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    pub fn last_request(&self) -> Option<(String, Option<String>)> {
        self.state().requests.last().cloned()
    }
}

pub fn person_json(name: &str) -> Value {
    json!({ "name": name, "gender": "F", "dob": "1980-02-03T00:00:00.000Z", "bio": "bio" })
}

pub fn movie_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "year_of_release": 2001,
        "plot": format!("{name} plot"),
        "poster": format!("/uploads/{id}.jpg"),
        "producer_id": person_json("Producer"),
        "actors": [person_json("Actor")],
    })
}

/// A create form with every field filled.
pub fn complete_form(name: &str) -> MovieForm {
    let mut form = MovieForm::new(cinedex::form::FormMode::Create);
    fill(&mut form, name);
    form.set_poster(Some(PosterUpload::new("poster.png", vec![0x89, 0x50, 0x4e, 0x47])));
    form
}

pub fn fill(form: &mut MovieForm, name: &str) {
    let set = |form: &mut MovieForm, path: FieldPath, value: &str| {
        form.set_text(path, value).unwrap();
    };
    set(form, FieldPath::Movie(MovieField::Name), name);
    set(form, FieldPath::Movie(MovieField::YearOfRelease), "2010");
    set(form, FieldPath::Movie(MovieField::Plot), "A dream within a dream");
    for (path, value) in [
        (PersonField::Name, "Emma Thomas"),
        (PersonField::Gender, "F"),
        (PersonField::Dob, "1971-12-09"),
        (PersonField::Bio, "Producer"),
    ] {
        set(form, FieldPath::Producer(path), value);
    }
    for (path, value) in [
        (PersonField::Name, "Leonardo DiCaprio"),
        (PersonField::Gender, "M"),
        (PersonField::Dob, "1974-11-11"),
        (PersonField::Bio, "Actor"),
    ] {
        set(form, FieldPath::actor(0, path), value);
    }
}

async fn list_movies(State(shared): State<Shared>, headers: HeaderMap) -> Reply {
    shared.record("GET /movies".to_string(), &headers);
    let state = shared.lock();
    if state.fail_fetch {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        ));
    }
    Ok(Json(json!({ "movies": state.movies })))
}

/// Reads the multipart fields the client sends into a partial movie object.
async fn read_movie_fields(mut multipart: Multipart) -> Result<Value, (StatusCode, Json<Value>)> {
    let bad = |message: String| (StatusCode::BAD_REQUEST, Json(json!({ "message": message })));
    let mut movie = serde_json::Map::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| bad(e.to_string()))? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "poster" => {
                let file_name = field.file_name().unwrap_or("poster").to_string();
                let bytes = field.bytes().await.map_err(|e| bad(e.to_string()))?;
                if bytes.is_empty() {
                    return Err(bad("empty poster".to_string()));
                }
                movie.insert("poster".into(), json!(format!("/uploads/{file_name}")));
            }
            "producer" | "actors" => {
                let text = field.text().await.map_err(|e| bad(e.to_string()))?;
                let value: Value = serde_json::from_str(&text).map_err(|e| bad(e.to_string()))?;
                let key = if name == "producer" { "producer_id" } else { "actors" };
                movie.insert(key.into(), value);
            }
            "year_of_release" => {
                let text = field.text().await.map_err(|e| bad(e.to_string()))?;
                let year: i64 = text.parse().map_err(|_| bad(format!("bad year {text}")))?;
                movie.insert(name, json!(year));
            }
            _ => {
                let text = field.text().await.map_err(|e| bad(e.to_string()))?;
                movie.insert(name, json!(text));
            }
        }
    }
    Ok(Value::Object(movie))
}

async fn create_movie(State(shared): State<Shared>, headers: HeaderMap, multipart: Multipart) -> Reply {
    shared.record("POST /movies".to_string(), &headers);
    let mut movie = read_movie_fields(multipart).await?;
    if movie.get("poster").is_none() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "message": "poster is required" }))));
    }

    let mut state = shared.lock();
    state.next_id += 1;
    movie["_id"] = json!(format!("m{}", state.next_id));
    state.movies.push(movie.clone());
    Ok(Json(movie))
}

async fn update_movie(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Reply {
    shared.record(format!("PUT /movies/{id}"), &headers);
    let changes = read_movie_fields(multipart).await?;

    let mut state = shared.lock();
    let Some(existing) = state.movies.iter_mut().find(|m| m["_id"] == json!(id)) else {
        return Err((StatusCode::NOT_FOUND, Json(json!({ "message": "Movie not found" }))));
    };
    if let (Some(target), Value::Object(changes)) = (existing.as_object_mut(), changes) {
        for (key, value) in changes {
            target.insert(key, value);
        }
    }
    Ok(Json(existing.clone()))
}

async fn delete_movie(State(shared): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Reply {
    shared.record(format!("DELETE /movies/{id}"), &headers);
    let mut state = shared.lock();
    let before = state.movies.len();
    state.movies.retain(|m| m["_id"] != json!(id));
    if state.movies.len() == before {
        return Err((StatusCode::NOT_FOUND, Json(json!({ "message": "Movie not found" }))));
    }
    Ok(Json(json!({ "message": "Movie deleted" })))
}

async fn login(State(shared): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    shared.record("POST /auth/login".to_string(), &headers);
    if body["username"] == "a" && body["password"] == "b" {
        Ok(Json(json!({ "token": "t1" })))
    } else {
        Err((StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" }))))
    }
}

async fn signup(State(shared): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    shared.record("POST /auth/sign-up".to_string(), &headers);
    let username = body["username"].as_str().unwrap_or_default();
    Ok(Json(json!({ "token": format!("t-{username}") })))
}
