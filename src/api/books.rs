//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, FailResponse, Status},
    models::{Book, BookPayload, BookQuery, BookSummary},
};

/// Body of a successful create response
#[derive(Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub status: Status,
    pub message: String,
    pub data: BookIdData,
}

#[derive(Serialize, ToSchema)]
pub struct BookIdData {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// Body of a successful list response
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub status: Status,
    pub data: BooksData,
}

#[derive(Serialize, ToSchema)]
pub struct BooksData {
    pub books: Vec<BookSummary>,
}

/// Body of a successful get response
#[derive(Serialize, ToSchema)]
pub struct BookDetailResponse {
    pub status: Status,
    pub data: BookData,
}

#[derive(Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

/// Body of a successful update/delete response
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: Status,
    pub message: String,
}

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookCreatedResponse),
        (status = 400, description = "Invalid payload", body = FailResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<BookCreatedResponse>)> {
    let book_id = state.services.catalog.create_book(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            status: Status::Success,
            message: "Book added successfully.".to_string(),
            data: BookIdData { book_id },
        }),
    ))
}

/// List books with optional filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring match on name"),
        ("reading" = Option<String>, Query, description = "Flag filter, \"0\" or \"1\""),
        ("finished" = Option<String>, Query, description = "Flag filter, \"0\" or \"1\"")
    ),
    responses(
        (status = 200, description = "List of books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> Json<BookListResponse> {
    let books = state.services.catalog.list_books(&query);

    Json(BookListResponse {
        status: Status::Success,
        data: BooksData { books },
    })
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = FailResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookDetailResponse>> {
    let book = state.services.catalog.get_book(&id)?;

    Ok(Json(BookDetailResponse {
        status: Status::Success,
        data: BookData { book },
    }))
}

/// Replace a book's fields by id
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Invalid payload", body = FailResponse),
        (status = 404, description = "Book not found", body = FailResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.update_book(&id, payload)?;

    Ok(Json(MessageResponse {
        status: Status::Success,
        message: "Book updated successfully.".to_string(),
    }))
}

/// Delete a book by id
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = FailResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(&id)?;

    Ok(Json(MessageResponse {
        status: Status::Success,
        message: "Book deleted successfully.".to_string(),
    }))
}
