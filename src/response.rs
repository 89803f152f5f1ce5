//! Standard response envelope shared by the service, the controller and the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Lowest ordinal that counts as a failure. Every code below it is a success.
pub const FAILURE_THRESHOLD: u8 = 5;

/// Outcome of a request. Serialized by name; the ordinals only drive [`ServiceResponseCode::is_success`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceResponseCode {
    /// Unspecified success.
    #[default]
    Default = 0,
    GetSuccess = 1,
    AddSuccess = 2,
    UpdateSuccess = 3,
    DeleteSuccess = 4,
    /// No instance with the requested id.
    NotFound = 5,
    /// Another instance already holds the requested unique value.
    AlreadyExists = 6,
    /// Unexpected failure; the message carries the error text.
    UnknownError = 7,
    /// The remote endpoint produced no usable envelope. Client side only.
    NoApiResponse = 8,
}

impl ServiceResponseCode {
    pub const ALL: [ServiceResponseCode; 9] = [
        ServiceResponseCode::Default,
        ServiceResponseCode::GetSuccess,
        ServiceResponseCode::AddSuccess,
        ServiceResponseCode::UpdateSuccess,
        ServiceResponseCode::DeleteSuccess,
        ServiceResponseCode::NotFound,
        ServiceResponseCode::AlreadyExists,
        ServiceResponseCode::UnknownError,
        ServiceResponseCode::NoApiResponse,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self.ordinal() < FAILURE_THRESHOLD
    }

    /// Wire spelling of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceResponseCode::Default => "Default",
            ServiceResponseCode::GetSuccess => "GetSuccess",
            ServiceResponseCode::AddSuccess => "AddSuccess",
            ServiceResponseCode::UpdateSuccess => "UpdateSuccess",
            ServiceResponseCode::DeleteSuccess => "DeleteSuccess",
            ServiceResponseCode::NotFound => "NotFound",
            ServiceResponseCode::AlreadyExists => "AlreadyExists",
            ServiceResponseCode::UnknownError => "UnknownError",
            ServiceResponseCode::NoApiResponse => "NoApiResponse",
        }
    }
}

impl fmt::Display for ServiceResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope around every operation result: optional payload, status code and free-text message.
///
/// JSON shape: `{ "data": T|null, "responseCode": "<name>", "responseMessage": "...", "success": bool }`.
/// `success` is derived from the code and ignored on input.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub response_code: ServiceResponseCode,
    #[serde(default)]
    pub response_message: String,
}

impl<T> Default for ServiceResponse<T> {
    fn default() -> Self {
        ServiceResponse {
            data: None,
            response_code: ServiceResponseCode::Default,
            response_message: String::new(),
        }
    }
}

impl<T> ServiceResponse<T> {
    pub fn with_data(code: ServiceResponseCode, data: T) -> Self {
        ServiceResponse {
            data: Some(data),
            response_code: code,
            response_message: String::new(),
        }
    }

    /// Envelope without payload or message.
    pub fn from_code(code: ServiceResponseCode) -> Self {
        ServiceResponse {
            data: None,
            response_code: code,
            response_message: String::new(),
        }
    }

    pub fn failure(code: ServiceResponseCode, message: impl Into<String>) -> Self {
        ServiceResponse {
            data: None,
            response_code: code,
            response_message: message.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.response_code.is_success()
    }

    pub fn map<V>(self, f: impl FnOnce(T) -> V) -> ServiceResponse<V> {
        ServiceResponse {
            data: self.data.map(f),
            response_code: self.response_code,
            response_message: self.response_message,
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// `Ok(data)` on success, otherwise the failure code and message.
    pub fn into_result(self) -> Result<Option<T>, (ServiceResponseCode, String)> {
        if self.success() {
            Ok(self.data)
        } else {
            Err((self.response_code, self.response_message))
        }
    }

    /// HTTP status the controller answers with: 200 on success, 400 otherwise.
    pub fn status_code(&self) -> StatusCode {
        if self.success() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl<T: Serialize> Serialize for ServiceResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ServiceResponse", 4)?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("responseCode", &self.response_code)?;
        state.serialize_field("responseMessage", &self.response_message)?;
        state.serialize_field("success", &self.success())?;
        state.end()
    }
}

/// The envelope is the body for both outcomes; only the status differs.
impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ServiceResponseCode::Default, true)]
    #[case(ServiceResponseCode::GetSuccess, true)]
    #[case(ServiceResponseCode::AddSuccess, true)]
    #[case(ServiceResponseCode::UpdateSuccess, true)]
    #[case(ServiceResponseCode::DeleteSuccess, true)]
    #[case(ServiceResponseCode::NotFound, false)]
    #[case(ServiceResponseCode::AlreadyExists, false)]
    #[case(ServiceResponseCode::UnknownError, false)]
    #[case(ServiceResponseCode::NoApiResponse, false)]
    fn success_follows_ordinal_threshold(#[case] code: ServiceResponseCode, #[case] expected: bool) {
        let response: ServiceResponse<()> = ServiceResponse::from_code(code);
        assert_eq!(response.success(), expected);
        assert_eq!(code.is_success(), code.ordinal() < FAILURE_THRESHOLD);
    }

    #[test]
    fn ordinals_are_stable() {
        let ordinals: Vec<u8> = ServiceResponseCode::ALL.iter().map(|c| c.ordinal()).collect();
        assert_eq!(ordinals, (0..9).collect::<Vec<u8>>());
    }

    #[test]
    fn serializes_code_by_name() {
        for code in ServiceResponseCode::ALL {
            assert_eq!(serde_json::to_value(code).unwrap(), json!(code.as_str()));
        }
    }

    #[test]
    fn envelope_json_shape() {
        let response = ServiceResponse::with_data(ServiceResponseCode::GetSuccess, json!({ "id": 1 }));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "data": { "id": 1 },
                "responseCode": "GetSuccess",
                "responseMessage": "",
                "success": true
            })
        );

        let failure: ServiceResponse<i32> = ServiceResponse::failure(ServiceResponseCode::UnknownError, "boom");
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "data": null,
                "responseCode": "UnknownError",
                "responseMessage": "boom",
                "success": false
            })
        );
    }

    #[test]
    fn deserialize_defaults_missing_fields() {
        let response: ServiceResponse<i32> = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response, ServiceResponse::default());

        let response: ServiceResponse<i32> = serde_json::from_value(json!({
            "data": 7,
            "responseCode": "AlreadyExists",
            "responseMessage": "taken",
            "success": true
        }))
        .unwrap();
        assert_eq!(response.data, Some(7));
        assert_eq!(response.response_code, ServiceResponseCode::AlreadyExists);
        assert!(!response.success());
    }

    #[test]
    fn rejects_unknown_code_name() {
        let result: Result<ServiceResponse<i32>, _> = serde_json::from_value(json!({ "responseCode": "Teapot" }));
        assert!(result.is_err());
    }

    #[test]
    fn http_status_follows_success() {
        let ok: ServiceResponse<()> = ServiceResponse::from_code(ServiceResponseCode::DeleteSuccess);
        assert_eq!(ok.into_response().status(), StatusCode::OK);
        let bad: ServiceResponse<()> = ServiceResponse::from_code(ServiceResponseCode::NotFound);
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn map_keeps_code_and_message() {
        let response = ServiceResponse::with_data(ServiceResponseCode::AddSuccess, 2).map(|n| n * 10);
        assert_eq!(response.data, Some(20));
        assert_eq!(response.response_code, ServiceResponseCode::AddSuccess);
    }

    #[test]
    fn into_result_splits_on_success() {
        let ok = ServiceResponse::with_data(ServiceResponseCode::GetSuccess, "a").into_result();
        assert_eq!(ok, Ok(Some("a")));
        let err: Result<Option<()>, _> =
            ServiceResponse::failure(ServiceResponseCode::UnknownError, "boom").into_result();
        assert_eq!(err, Err((ServiceResponseCode::UnknownError, "boom".to_string())));
    }
}
