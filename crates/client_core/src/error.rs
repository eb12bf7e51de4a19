use shared::error::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown action kind '{0}'")]
    UnknownAction(String),
    #[error("malformed action payload: {0}")]
    MalformedAction(#[source] serde_json::Error),
    #[error("invalid route path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("select a departure flight, and a return flight for a round trip, before continuing")]
    SelectionIncomplete,
    #[error("a payment is already being processed")]
    PaymentInProgress,
}
