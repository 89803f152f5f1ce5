//! Route builders: common endpoints and per-model CRUD.

mod common;
mod entity;

pub use common::{common_routes, common_routes_with_ready};
pub use entity::{crud_routes, CrudApi};
