use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use stowage::{Error, LocationId, StoreError};

/// Every failure a handler can return, rendered as a JSON body with a
/// matching status code.
#[derive(Debug)]
pub enum ApiError {
    /// A generation request failed.
    Generation(Error),
    /// A plain catalog operation failed.
    Store(StoreError),
    /// The request body was not valid JSON for the endpoint.
    BadRequest(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    collisions: Vec<String>,
}

impl ApiError {
    pub fn not_found(id: LocationId) -> Self {
        Self::Store(StoreError::NotFound { id })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Generation(err) => match err {
                Error::UnsupportedType { .. }
                | Error::MalformedDimension { .. }
                | Error::TooManyLocations { .. } => StatusCode::BAD_REQUEST,
                Error::Collision { .. } => StatusCode::CONFLICT,
                Error::Persistence(err) => store_status(err),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(err) => store_status(err),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Conflict { .. } => StatusCode::CONFLICT,
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Generation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self:?}");
        }

        let body = match self {
            Self::Generation(err) => ErrorBody {
                success: false,
                message: err.to_string(),
                collisions: match err {
                    Error::Collision { names } => names,
                    _ => Vec::new(),
                },
            },
            Self::Store(err) => ErrorBody {
                success: false,
                message: err.to_string(),
                collisions: match err {
                    StoreError::Conflict { names } => names,
                    _ => Vec::new(),
                },
            },
            Self::BadRequest(message) => ErrorBody {
                success: false,
                message,
                collisions: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}
