use thiserror::Error;

use crate::hydrate::HydrateError;

/// An error raised while encoding or decoding JSON text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextError {
    #[error("malformed JSON text: {0}")]
    MalformedText(#[source] serde_json::Error),
    #[error("failed to encode JSON text: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Hydrate(#[from] HydrateError),
}
