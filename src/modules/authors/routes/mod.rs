//! HTTP handlers for `/api/authors`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookshelf_db::{Collection, DocumentId, StoreHandle};
use bookshelf_http::{AppError, MessageBody};
use serde_json::Value;

use super::models::Author;
use super::validation;

const NOT_FOUND: &str = "Author not found";
const DELETED: &str = "Author deleted successfully";

#[derive(Clone)]
struct AuthorsState {
    authors: Collection<Author>,
}

/// Router for the authors resource, relative to its mount point.
pub fn router(store: StoreHandle) -> Router {
    let state = AuthorsState {
        authors: Collection::new(store),
    };

    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route(
            "/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
        .with_state(state)
}

async fn list_authors(State(state): State<AuthorsState>) -> Result<Json<Vec<Author>>, AppError> {
    Ok(Json(state.authors.find_all().await?))
}

async fn get_author(
    State(state): State<AuthorsState>,
    Path(id): Path<String>,
) -> Result<Json<Author>, AppError> {
    let author = match DocumentId::parse(&id) {
        Some(id) => state.authors.find_by_id(id).await?,
        None => None,
    };
    author.map(Json).ok_or_else(|| AppError::not_found(NOT_FOUND))
}

async fn create_author(
    State(state): State<AuthorsState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let Json(input) = body?;
    let new_author = validation::validate_create(&input)?;

    let author = new_author.into_author(DocumentId::generate());
    state.authors.insert(&author).await?;

    tracing::info!(author_id = %author.id, "author created");
    Ok((StatusCode::CREATED, Json(author)))
}

/// Responds with `null` when no author has the id.
async fn update_author(
    State(state): State<AuthorsState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Option<Author>>, AppError> {
    let Json(input) = body?;
    let patch = validation::validate_update(&input)?;

    let updated = match DocumentId::parse(&id) {
        Some(id) => state.authors.update_by_id(id, &patch).await?,
        None => None,
    };

    match &updated {
        Some(author) => tracing::info!(author_id = %author.id, "author updated"),
        None => tracing::debug!(author_id = %id, "update matched no author"),
    }
    Ok(Json(updated))
}

async fn delete_author(
    State(state): State<AuthorsState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    let deleted = match DocumentId::parse(&id) {
        Some(id) => state.authors.delete_by_id(id).await?,
        None => false,
    };
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }

    tracing::info!(author_id = %id, "author deleted");
    Ok(Json(MessageBody::new(DELETED)))
}
