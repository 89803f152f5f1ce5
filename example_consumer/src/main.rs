//! Example consumer: a separate Rust project that serves a `Book` model through crud-sdk.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Or from this directory: `cargo run`
//!
//! Set `CRUD_STORE=postgres` and `DATABASE_URL` to persist books in PostgreSQL; the default is an
//! in-memory store.

use crud_sdk::{
    common_routes_with_ready, ensure_database_exists, AlwaysReady, AppState, CrudApi, CrudService,
    DataStore, Entity, FieldValue, Fields, GenericService, MemoryStore, MergeInto, PgStore,
    ReadinessProbe, ServerConfig, ServiceOptions, StoreBackend, TableRef,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Book {
    id: i64,
    title: String,
    author: String,
    isbn: String,
    year: Option<i32>,
}

impl Entity for Book {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Fields for Book {
    fn type_name(&self) -> &'static str {
        "Book"
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "title" => Some((&self.title).into()),
            "author" => Some((&self.author).into()),
            "isbn" => Some((&self.isbn).into()),
            "year" => Some(self.year.into()),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GetBookDto {
    id: i64,
    title: String,
    author: String,
    isbn: String,
    year: Option<i32>,
}

impl From<&Book> for GetBookDto {
    fn from(book: &Book) -> Self {
        GetBookDto {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            year: book.year,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBookDto {
    title: String,
    author: String,
    isbn: String,
    #[serde(default)]
    year: Option<i32>,
}

impl Fields for AddBookDto {
    fn type_name(&self) -> &'static str {
        "AddBookDto"
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some((&self.title).into()),
            "author" => Some((&self.author).into()),
            "isbn" => Some((&self.isbn).into()),
            "year" => Some(self.year.into()),
            _ => None,
        }
    }
}

impl From<AddBookDto> for Book {
    fn from(dto: AddBookDto) -> Self {
        Book {
            id: 0,
            title: dto.title,
            author: dto.author,
            isbn: dto.isbn,
            year: dto.year,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBookDto {
    title: String,
    author: String,
    isbn: String,
    #[serde(default)]
    year: Option<i32>,
}

impl Fields for UpdateBookDto {
    fn type_name(&self) -> &'static str {
        "UpdateBookDto"
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some((&self.title).into()),
            "author" => Some((&self.author).into()),
            "isbn" => Some((&self.isbn).into()),
            "year" => Some(self.year.into()),
            _ => None,
        }
    }
}

impl MergeInto<Book> for UpdateBookDto {
    fn merge_into(self, book: &mut Book) {
        book.title = self.title;
        book.author = self.author;
        book.isbn = self.isbn;
        book.year = self.year;
    }
}

type BookService = CrudService<Book, GetBookDto, AddBookDto, UpdateBookDto>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("crud_sdk=info,example_consumer=info")
                }),
        )
        .init();

    let config = ServerConfig::load()?;

    let (store, probe): (Arc<dyn DataStore<Book>>, Arc<dyn ReadinessProbe>) = match config.store {
        StoreBackend::Memory => {
            let store: Arc<dyn DataStore<Book>> = Arc::new(MemoryStore::<Book>::new());
            let probe: Arc<dyn ReadinessProbe> = Arc::new(AlwaysReady);
            (store, probe)
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL is required for the postgres store")?;
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let books = PgStore::<Book>::new(pool.clone(), TableRef::new(&config.schema, "book"));
            books.ensure_table().await?;
            let store: Arc<dyn DataStore<Book>> = Arc::new(books);
            let probe: Arc<dyn ReadinessProbe> = Arc::new(pool);
            (store, probe)
        }
    };

    let options = ServiceOptions {
        redact_errors: config.redact_errors,
    };
    let service: Arc<dyn GenericService<GetBookDto, AddBookDto, UpdateBookDto>> =
        Arc::new(BookService::new(store).with_options(options));
    let api = CrudApi::new(&config.route_prefix)
        .with_body_limit(config.max_body_bytes)
        .with_options(options)
        .register("Book", service)?;
    tracing::info!(models = ?api.model_names(), prefix = %api.route_prefix(), "crud api assembled");

    let app = common_routes_with_ready(AppState { probe }).merge(api.into_router());
    let listener = TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Example consumer listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
