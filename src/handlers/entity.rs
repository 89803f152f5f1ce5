//! CRUD handlers: translate each route into one service call and the envelope into 200 or 400.

use crate::error::AppError;
use crate::response::ServiceResponse;
use crate::state::CrudState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Bounds on the read shape served by the routes.
pub trait ReadShape: Serialize + Send + 'static {}
impl<T> ReadShape for T where T: Serialize + Send + 'static {}

/// Bounds on the add and update shapes accepted by the routes.
pub trait InputShape: DeserializeOwned + Send + 'static {}
impl<T> InputShape for T where T: DeserializeOwned + Send + 'static {}

/// `None` for anything but an integer; such requests do not match the id routes.
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn route_not_matched() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// PUT and DELETE on `/{Model}/all`: `all` is not an id.
pub async fn not_an_id() -> Response {
    route_not_matched()
}

/// A rejected body answers with an `UnknownError` envelope, redacted like any other failure.
fn read_body<T>(
    body: Result<Json<T>, JsonRejection>,
    redact: bool,
) -> Result<T, ServiceResponse<()>> {
    body.map(|Json(dto)| dto).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "request body rejected");
        AppError::BadRequest(rejection.body_text()).into_envelope(redact)
    })
}

/// GET /{Model}/all
pub async fn list<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
) -> ServiceResponse<Vec<G>> {
    state.service.get_all().await
}

/// GET /{Model}/{id}
pub async fn read<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
    Path(key): Path<String>,
) -> Response {
    let Some(id) = parse_id(&key) else {
        return route_not_matched();
    };
    state.service.get(id).await.into_response()
}

/// DELETE /{Model}/{id}
pub async fn remove<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
    Path(key): Path<String>,
) -> Response {
    let Some(id) = parse_id(&key) else {
        return route_not_matched();
    };
    state.service.delete(id).await.into_response()
}

/// POST /{Model}
pub async fn create<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
    body: Result<Json<A>, JsonRejection>,
) -> Result<ServiceResponse<G>, ServiceResponse<()>> {
    let dto = read_body(body, state.redact_errors)?;
    Ok(state.service.add(dto).await)
}

/// POST /{Model}/{uniqueField}
pub async fn create_unique<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
    Path(unique_field): Path<String>,
    body: Result<Json<A>, JsonRejection>,
) -> Result<ServiceResponse<G>, ServiceResponse<()>> {
    let dto = read_body(body, state.redact_errors)?;
    Ok(state.service.add_unique(dto, &unique_field).await)
}

/// POST /{Model}/all: the static segment shadows the parameter, so `all` is passed on as the field.
pub async fn create_unique_all<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
    body: Result<Json<A>, JsonRejection>,
) -> Result<ServiceResponse<G>, ServiceResponse<()>> {
    let dto = read_body(body, state.redact_errors)?;
    Ok(state.service.add_unique(dto, "all").await)
}

/// PUT /{Model}/{id}
pub async fn update<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
    Path(key): Path<String>,
    body: Result<Json<U>, JsonRejection>,
) -> Result<Response, ServiceResponse<()>> {
    let Some(id) = parse_id(&key) else {
        return Ok(route_not_matched());
    };
    let dto = read_body(body, state.redact_errors)?;
    Ok(state.service.update(dto, id).await.into_response())
}

/// PUT /{Model}/{id}/{uniqueField}
pub async fn update_unique<G: ReadShape, A: InputShape, U: InputShape>(
    State(state): State<CrudState<G, A, U>>,
    Path((key, unique_field)): Path<(String, String)>,
    body: Result<Json<U>, JsonRejection>,
) -> Result<Response, ServiceResponse<()>> {
    let Some(id) = parse_id(&key) else {
        return Ok(route_not_matched());
    };
    let dto = read_body(body, state.redact_errors)?;
    Ok(state
        .service
        .update_unique(dto, id, &unique_field)
        .await
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("-1"), Some(-1));
        assert_eq!(parse_id("uniqueName"), None);
        assert_eq!(parse_id("1.5"), None);
    }
}
