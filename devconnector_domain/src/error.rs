use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::borrow::Cow;
use std::collections::HashMap;

pub type DcResult<T, E = DcError> = std::result::Result<T, E>;

pub type FieldErrors = HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>;

#[derive(thiserror::Error, Debug)]
pub enum DcError {
    #[error("authorization denied")]
    Unauthorized,

    #[error("error in the request body")]
    Validation(FieldErrors),

    #[error("There is no profile for this user")]
    NoProfileForUser,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("No github profile found")]
    GithubProfileNotFound,

    #[error("an error occurred with the database")]
    Storage(#[from] sqlx::Error),

    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

impl DcError {
    /// Convenient constructor for `DcError::Validation`.
    ///
    /// Multiple messages for the same field are collected into a list for that field.
    pub fn validation<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        let mut error_map = FieldErrors::new();

        for (key, val) in errors {
            error_map
                .entry(key.into())
                .or_insert_with(Vec::new)
                .push(val.into());
        }

        Self::Validation(error_map)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NoProfileForUser => StatusCode::NOT_FOUND,
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::GithubProfileNotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DcError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                self.status_code(),
                [(WWW_AUTHENTICATE, HeaderValue::from_static("Token"))]
                    .into_iter()
                    .collect::<HeaderMap>(),
                Json(JsonMessage {
                    msg: self.to_string().into(),
                }),
            )
                .into_response(),
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(JsonErrors { errors })).into_response()
            }
            Self::NoProfileForUser | Self::ProfileNotFound | Self::GithubProfileNotFound => (
                self.status_code(),
                Json(JsonMessage {
                    msg: self.to_string().into(),
                }),
            )
                .into_response(),
            Self::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (self.status_code(), "Server Error").into_response()
            }
            Self::Anyhow(ref e) => {
                tracing::error!("Generic error: {:?}", e);
                (self.status_code(), "Server Error").into_response()
            }
        }
    }
}

#[derive(serde::Serialize)]
struct JsonMessage {
    msg: Cow<'static, str>,
}

#[derive(serde::Serialize)]
struct JsonErrors {
    errors: FieldErrors,
}
