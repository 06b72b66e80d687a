//! Book inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::book::{Book, CreateBook},
};

/// Response carrying a single book and a status message
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    /// Status message
    pub message: String,
    /// The affected book
    pub book: Book,
}

/// Response carrying a list of books
#[derive(Serialize, ToSchema)]
pub struct BooksResponse {
    /// The matching books
    pub books: Vec<Book>,
}

/// Add a new book to the inventory
#[utoipa::path(
    post,
    path = "/addBook",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book added", body = BookResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Creation failed (e.g. duplicate ISBN)", body = ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.library.add_book(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Book added successfully".to_string(),
            book,
        }),
    ))
}

/// Borrow a book by ISBN
#[utoipa::path(
    put,
    path = "/borrowBook/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book borrowed", body = BookResponse),
        (status = 404, description = "Book absent or already borrowed", body = ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.library.borrow_book(&isbn).await?;

    Ok(Json(BookResponse {
        message: "Book borrowed successfully".to_string(),
        book,
    }))
}

/// Return a borrowed book by ISBN
#[utoipa::path(
    put,
    path = "/returnBook/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book returned", body = BookResponse),
        (status = 404, description = "Book absent or already available", body = ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.library.return_book(&isbn).await?;

    Ok(Json(BookResponse {
        message: "Book returned successfully".to_string(),
        book,
    }))
}

/// List books currently available to borrow
#[utoipa::path(
    get,
    path = "/availableBooks",
    tag = "books",
    responses(
        (status = 200, description = "Available books", body = BooksResponse)
    )
)]
pub async fn available_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.library.available_books().await?;
    Ok(Json(BooksResponse { books }))
}

/// List every book in the inventory
#[utoipa::path(
    get,
    path = "/allBooks",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BooksResponse)
    )
)]
pub async fn all_books(State(state): State<crate::AppState>) -> AppResult<Json<BooksResponse>> {
    let books = state.services.library.all_books().await?;
    Ok(Json(BooksResponse { books }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        api,
        config::AppConfig,
        error::AppError,
        models::book::Book,
        repository::MockBookStore,
        services::{library::LibraryService, Services},
        AppState,
    };

    fn app(store: MockBookStore) -> Router {
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services {
                library: LibraryService::new(Arc::new(store)),
            }),
        };
        api::create_router(state)
    }

    fn book(isbn: &str, available: bool) -> Book {
        Book {
            isbn: isbn.to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            year: 1965,
            is_available: available,
        }
    }

    fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn add_book_returns_201_with_created_book() {
        let mut store = MockBookStore::new();
        store.expect_insert().returning(|b| Ok(b.clone()));

        let request = json_request(
            Method::POST,
            "/api/addBook",
            Some(json!({
                "isbn": "12345",
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965
            })),
        );

        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Book added successfully");
        assert_eq!(body["book"]["isbn"], "12345");
        assert_eq!(body["book"]["isAvailable"], true);
    }

    #[tokio::test]
    async fn add_book_lists_missing_fields_in_400() {
        let store = MockBookStore::new();

        let request = json_request(
            Method::POST,
            "/api/addBook",
            Some(json!({ "title": "Dune" })),
        );

        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Missing required fields");
        assert_eq!(body["missingFields"], json!(["isbn", "author", "year"]));
    }

    #[tokio::test]
    async fn add_book_store_failure_returns_500_with_raw_error() {
        let mut store = MockBookStore::new();
        store
            .expect_insert()
            .returning(|_| Err(AppError::Database(sqlx::Error::RowNotFound)));

        let request = json_request(
            Method::POST,
            "/api/addBook",
            Some(json!({
                "isbn": "12345",
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965
            })),
        );

        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An error occurred");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn borrow_book_returns_200_and_flips_availability() {
        let mut store = MockBookStore::new();
        store
            .expect_mark_borrowed()
            .returning(|isbn| Ok(Some(book(isbn, false))));

        let request = json_request(Method::PUT, "/api/borrowBook/12345", None);
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Book borrowed successfully");
        assert_eq!(body["book"]["isAvailable"], false);
    }

    #[tokio::test]
    async fn borrow_book_collapses_missing_and_borrowed_into_404() {
        let mut store = MockBookStore::new();
        store.expect_mark_borrowed().returning(|_| Ok(None));

        let request = json_request(Method::PUT, "/api/borrowBook/12345", None);
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Book not available");
    }

    #[tokio::test]
    async fn return_book_returns_200_and_flips_availability() {
        let mut store = MockBookStore::new();
        store
            .expect_mark_returned()
            .returning(|isbn| Ok(Some(book(isbn, true))));

        let request = json_request(Method::PUT, "/api/returnBook/12345", None);
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Book returned successfully");
        assert_eq!(body["book"]["isAvailable"], true);
    }

    #[tokio::test]
    async fn return_book_distinguishes_missing_from_already_available() {
        let mut store = MockBookStore::new();
        store.expect_mark_returned().returning(|_| Ok(None));
        store.expect_find_by_isbn().returning(|_| Ok(None));

        let request = json_request(Method::PUT, "/api/returnBook/ghost", None);
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "No book exist with this ISBN");

        let mut store = MockBookStore::new();
        store.expect_mark_returned().returning(|_| Ok(None));
        store
            .expect_find_by_isbn()
            .returning(|isbn| Ok(Some(book(isbn, true))));

        let request = json_request(Method::PUT, "/api/returnBook/12345", None);
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Book already available");
    }

    #[tokio::test]
    async fn available_books_returns_filtered_list() {
        let mut store = MockBookStore::new();
        store
            .expect_find_available()
            .returning(|| Ok(vec![book("1", true)]));

        let request = json_request(Method::GET, "/api/availableBooks", None);
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["books"].as_array().unwrap().len(), 1);
        assert_eq!(body["books"][0]["isAvailable"], true);
    }

    #[tokio::test]
    async fn all_books_returns_everything() {
        let mut store = MockBookStore::new();
        store
            .expect_find_all()
            .returning(|| Ok(vec![book("1", true), book("2", false)]));

        let request = json_request(Method::GET, "/api/allBooks", None);
        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["books"].as_array().unwrap().len(), 2);
    }
}
