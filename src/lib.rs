//! CRUD SDK: generic service, routes and client for exposing models over a uniform response envelope.

pub mod case;
pub mod client;
pub mod config;
pub mod error;
pub mod field;
pub mod handlers;
pub mod mapper;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use client::{ClientConfig, GenericClient};
pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ClientError, ConfigError, FieldError, StoreError};
pub use field::{property, property_value, FieldValue, Fields, FromFieldValue};
pub use mapper::{map_all, MergeInto};
pub use response::{ServiceResponse, ServiceResponseCode};
pub use routes::{common_routes, common_routes_with_ready, crud_routes, CrudApi};
pub use service::{CrudService, GenericService, ServiceOptions};
pub use sql::TableRef;
pub use state::AppState;
pub use store::{ensure_database_exists, AlwaysReady, DataStore, Entity, MemoryStore, PgStore, ReadinessProbe};
