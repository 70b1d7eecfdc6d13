use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub titre: String,
    pub description: String,
    pub complete: bool,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub titre: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub titre: Option<String>,
    pub description: Option<String>,
    pub complete: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

struct Account {
    user: User,
    password: String,
}

struct StoredTask {
    owner: i64,
    task: Task,
}

#[derive(Default)]
pub struct Store {
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, i64>,
    tasks: BTreeMap<i64, StoredTask>,
    next_user_id: i64,
    next_task_id: i64,
}

impl Store {
    fn open_session(&mut self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user_id);
        token
    }

    fn owned_task(&mut self, owner: i64, id: i64) -> Result<&mut Task, ApiFailure> {
        match self.tasks.get_mut(&id) {
            Some(stored) if stored.owner == owner => Ok(&mut stored.task),
            _ => Err(ApiFailure::not_found()),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error response carrying the `{ "errors": [...] }` envelope.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Token manquant ou invalide")
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Tâche introuvable")
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            errors: vec![self.message],
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/tache/get", get(list_tasks))
        .route("/tache/create", post(create_task))
        .route("/tache/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn authorize(store: &Store, headers: &HeaderMap) -> Result<i64, ApiFailure> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(ApiFailure::unauthorized)?;
    store
        .sessions
        .get(token)
        .copied()
        .ok_or_else(ApiFailure::unauthorized)
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiFailure> {
    if input.username.trim().is_empty() || input.password.is_empty() || input.email.trim().is_empty() {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "Nom d'utilisateur, mot de passe et email requis",
        ));
    }

    let mut store = db.write().await;
    if store.accounts.contains_key(&input.username) {
        return Err(ApiFailure::new(StatusCode::BAD_REQUEST, "Nom d'utilisateur déjà utilisé"));
    }

    store.next_user_id += 1;
    let user = User {
        id: store.next_user_id,
        email: input.email,
        username: input.username.clone(),
        bio: input.bio,
    };
    store.accounts.insert(
        input.username,
        Account {
            user: user.clone(),
            password: input.password,
        },
    );
    let token = store.open_session(user.id);
    tracing::info!(user_id = user.id, "account registered");
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiFailure> {
    let mut store = db.write().await;
    let user = match store.accounts.get(&input.username) {
        Some(account) if account.password == input.password => account.user.clone(),
        _ => return Err(ApiFailure::new(StatusCode::UNAUTHORIZED, "Identifiants invalides")),
    };
    let token = store.open_session(user.id);
    Ok(Json(AuthResponse { token, user }))
}

async fn list_tasks(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<Task>>, ApiFailure> {
    let store = db.read().await;
    let owner = authorize(&store, &headers)?;
    let tasks = store
        .tasks
        .values()
        .filter(|stored| stored.owner == owner)
        .map(|stored| stored.task.clone())
        .collect();
    Ok(Json(tasks))
}

async fn create_task(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiFailure> {
    let mut store = db.write().await;
    let owner = authorize(&store, &headers)?;
    if input.titre.trim().is_empty() {
        return Err(ApiFailure::new(StatusCode::BAD_REQUEST, "Titre requis"));
    }

    store.next_task_id += 1;
    let task = Task {
        id: store.next_task_id,
        titre: input.titre,
        description: input.description,
        complete: false,
    };
    store.tasks.insert(
        task.id,
        StoredTask {
            owner,
            task: task.clone(),
        },
    );
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiFailure> {
    let mut store = db.write().await;
    let owner = authorize(&store, &headers)?;
    let task = store.owned_task(owner, id)?;
    Ok(Json(task.clone()))
}

async fn update_task(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, ApiFailure> {
    let mut store = db.write().await;
    let owner = authorize(&store, &headers)?;
    let task = store.owned_task(owner, id)?;
    if let Some(titre) = input.titre {
        task.titre = titre;
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(complete) = input.complete {
        task.complete = complete;
    }
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    let owner = authorize(&store, &headers)?;
    store.owned_task(owner, id)?;
    store.tasks.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}
