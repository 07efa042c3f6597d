//! Error types returned by the samples

use crate::gcp::http::RequestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("error instantiating client: {0:#}")]
    ClientInit(#[source] anyhow::Error),

    #[error("error converting timestamp: {0}")]
    TimestampConversion(String),

    #[error("error {context}: {source}")]
    Request {
        context: &'static str,
        #[source]
        source: RequestError,
    },

    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn request(context: &'static str) -> impl FnOnce(RequestError) -> Self {
        move |source| Error::Request { context, source }
    }

    /// The underlying request failure, if the remote call was the cause
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            Error::Request { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
