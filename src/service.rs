use actix::MailboxError;

use crate::actuators::chat::dto::HttpErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Box<str>),
    #[error("Service Unavailable")]
    ServiceUnavailable,
    #[error("{0}")]
    Upstream(Box<str>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait CoercibleResult<T> {
    fn into_service_result(self) -> Result<T>;
}

impl<T, E> CoercibleResult<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_service_result(self) -> Result<T> {
        self.map_err(|e| anyhow::Error::from(e).into())
    }
}

pub trait ActixResult<T> {
    fn into_service_result(self) -> Result<T>;
}

impl<T> ActixResult<T> for std::result::Result<Result<T>, MailboxError> {
    fn into_service_result(self) -> Result<T> {
        match self {
            Ok(service_response) => match service_response {
                Ok(response) => Ok(response),
                Err(error) => {
                    tracing::error!("Service error: {:?}", error);
                    Err(error)
                }
            },
            Err(error) => {
                tracing::error!("Mailbox error: {:?}", error);
                Err(Error::ServiceUnavailable)
            }
        }
    }
}

impl From<MailboxError> for Error {
    fn from(_: MailboxError) -> Self {
        Error::ServiceUnavailable
    }
}

#[cfg(feature = "chat-in")]
impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Box::from("Service Unavailable"),
            ),
            Error::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Box::from("Internal Server Error"),
            ),
        };

        (status, axum::Json(HttpErrorBody { error: message })).into_response()
    }
}
