use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: Option<String>,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Deserialize)]
pub struct NewUser {
    #[serde(rename = "@type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

pub type Db = Arc<RwLock<HashMap<String, StoredUser>>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route("/user/", get(list_users).post(create_user))
        .route("/user/{id}", get(get_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn no_record(id: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"@id": id, "error": "No Record Found"})),
    )
}

async fn list_users(State(db): State<Db>) -> Json<Vec<StoredUser>> {
    let users = db.read().await;
    Json(users.values().cloned().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<StoredUser>)> {
    let mut users = db.write().await;
    // Emails are unique across user records.
    if let Some(existing) = users.values().find(|u| u.email == input.email) {
        tracing::debug!(id = %existing.id, "rejecting duplicate email");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "User Already Exists", "@id": existing.id})),
        ));
    }
    let user = StoredUser {
        id: Uuid::new_v4().to_string(),
        kind: input.kind.unwrap_or_else(|| "Person".to_string()),
        name: input.name,
        email: input.email,
        is_admin: input.is_admin,
    };
    users.insert(user.id.clone(), user.clone());
    tracing::info!(id = %user.id, "created user");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<StoredUser>> {
    let users = db.read().await;
    users.get(&id).cloned().map(Json).ok_or_else(|| no_record(&id))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<StoredUser>> {
    let mut users = db.write().await;
    let user = users.remove(&id).ok_or_else(|| no_record(&id))?;
    tracing::info!(id = %user.id, "deleted user");
    Ok(Json(user))
}
