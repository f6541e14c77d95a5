//! Error types for the library layer.

use std::fmt;

use crate::aggregates::NormalizeError;
use crate::keystore::KeyStoreError;

/// Errors produced by the library layer: upstream API errors plus key storage,
/// normalization and input validation failures.
#[derive(Debug)]
pub enum TraderError {
    /// An error from the underlying API client.
    Api(polygon_api::Error),
    /// Reading or writing the stored API key failed.
    KeyStore(KeyStoreError),
    /// Aggregate bars could not be normalized or saved.
    Normalize(NormalizeError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for TraderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::KeyStore(e) => write!(f, "Key store error: {}", e),
            Self::Normalize(e) => write!(f, "Normalization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for TraderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::KeyStore(e) => Some(e),
            Self::Normalize(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<polygon_api::Error> for TraderError {
    fn from(e: polygon_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<KeyStoreError> for TraderError {
    fn from(e: KeyStoreError) -> Self {
        Self::KeyStore(e)
    }
}

impl From<NormalizeError> for TraderError {
    fn from(e: NormalizeError) -> Self {
        Self::Normalize(e)
    }
}
