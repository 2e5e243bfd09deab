// src/errors.rs

use thiserror::Error;

pub type ConfabResult<T> = Result<T, ConfabError>;

#[derive(Debug, Error)]
pub enum ConfabError {
    #[error("API error: {message}")]
    Api { message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl ConfabError {
    pub fn api_error(message: impl Into<String>) -> Self {
        ConfabError::Api {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        ConfabError::Config {
            message: message.into(),
        }
    }
}
