use crate::validation::ValidationError;
use actix_web::http::header::{ContentType, WWW_AUTHENTICATE};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use core::fmt;
use log::error;
use std::error::Error;

#[derive(Debug)]
pub enum HttpError {
    GenericError(StatusCode),
    Unauthorized,
    Validation(ValidationError),
    Internal(anyhow::Error),
}

impl HttpError {
    pub fn from_status_code(status_code: StatusCode) -> Self {
        Self::GenericError(status_code)
    }

    fn reason(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            _ => self
                .status_code()
                .canonical_reason()
                .unwrap_or("unknown")
                .to_owned(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.status_code().as_str(), self.reason())
    }
}

impl Error for HttpError {}

impl From<ValidationError> for HttpError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

// Storage errors aren't shown to the client, so log the whole chain here
impl From<anyhow::Error> for HttpError {
    fn from(err: anyhow::Error) -> Self {
        error!("{err:?}");
        Self::Internal(err)
    }
}

impl ResponseError for HttpError {
    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        response.content_type(ContentType::plaintext());
        if let Self::Unauthorized = self {
            response.insert_header((WWW_AUTHENTICATE, "Basic realm=\"mailbox\""));
        }
        response.body(self.reason())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::GenericError(status_code) => *status_code,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
