use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use crate::core::{ProfileDocument, Result};
use crate::utils::error::{ErrorKind, FuncError};

impl IntoResponse for ProfileDocument {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

impl IntoResponse for FuncError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ConfigMissing | ErrorKind::StoreFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.public_message()).into_response()
    }
}

pub fn profile_response(result: Result<ProfileDocument>) -> Response {
    match result {
        Ok(document) => document.into_response(),
        Err(e) => e.into_response(),
    }
}
