//! HTTP handlers for `/api/books`.
//!
//! Reads replace each book's author reference with the author it names:
//! a summary in listings, the full record on a single fetch. References
//! that resolve to nothing become `null`. Writes echo the stored reference.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookshelf_db::{Collection, DocumentId, StoreHandle};
use bookshelf_http::{AppError, MessageBody};
use serde_json::Value;

use super::models::Book;
use super::validation;
use crate::modules::authors::models::{Author, AuthorSummary};

const NOT_FOUND: &str = "Book not found";
const DELETED: &str = "Book deleted successfully";

#[derive(Clone)]
struct BooksState {
    books: Collection<Book>,
    authors: Collection<Author>,
}

/// Router for the books resource, relative to its mount point.
pub fn router(store: StoreHandle) -> Router {
    let state = BooksState {
        books: Collection::new(store.clone()),
        authors: Collection::new(store),
    };

    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(state)
}

async fn list_books(
    State(state): State<BooksState>,
) -> Result<Json<Vec<Book<Option<AuthorSummary>>>>, AppError> {
    let books = state.books.find_all().await?;

    let author_ids: Vec<DocumentId> = books.iter().filter_map(|book| book.author_id()).collect();
    let summaries: HashMap<DocumentId, AuthorSummary> = state
        .authors
        .find_many_projected::<AuthorSummary>(&author_ids)
        .await?
        .into_iter()
        .map(|summary| (summary.id, summary))
        .collect();

    let expanded = books
        .into_iter()
        .map(|book| {
            let author = book
                .author_id()
                .and_then(|id| summaries.get(&id))
                .cloned();
            book.with_author(author)
        })
        .collect();

    Ok(Json(expanded))
}

async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<Book<Option<Author>>>, AppError> {
    let book = match DocumentId::parse(&id) {
        Some(id) => state.books.find_by_id(id).await?,
        None => None,
    };
    let Some(book) = book else {
        return Err(AppError::not_found(NOT_FOUND));
    };

    let author = match book.author_id() {
        Some(author_id) => state.authors.find_by_id(author_id).await?,
        None => None,
    };
    if author.is_none() {
        tracing::debug!(book_id = %book.id, author = %book.author, "book author does not resolve");
    }

    Ok(Json(book.with_author(author)))
}

async fn create_book(
    State(state): State<BooksState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(input) = body?;
    let new_book = validation::validate_create(&input)?;

    let book = new_book.into_book(DocumentId::generate());
    state.books.insert(&book).await?;

    tracing::info!(book_id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// Responds with `null` when no book has the id.
async fn update_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Option<Book>>, AppError> {
    let Json(input) = body?;
    let patch = validation::validate_update(&input)?;

    let updated = match DocumentId::parse(&id) {
        Some(id) => state.books.update_by_id(id, &patch).await?,
        None => None,
    };

    match &updated {
        Some(book) => tracing::info!(book_id = %book.id, "book updated"),
        None => tracing::debug!(book_id = %id, "update matched no book"),
    }
    Ok(Json(updated))
}

async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    let deleted = match DocumentId::parse(&id) {
        Some(id) => state.books.delete_by_id(id).await?,
        None => false,
    };
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }

    tracing::info!(book_id = %id, "book deleted");
    Ok(Json(MessageBody::new(DELETED)))
}
