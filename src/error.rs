use crate::api::ApiError;
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(err) => match err.response_message() {
                Some(message) if !message.is_empty() => format!("{err}: {message}"),
                _ => err.to_string(),
            },
            AppError::Config(err) => format!("Configuration error: {err}"),
            AppError::Io(err) => format!("Terminal or file system error: {err}"),
            AppError::Serialization(err) => format!("Data format error: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_includes_service_message() {
        let err = AppError::from(ApiError::Status {
            status: 404,
            body: "\"movie not found\"\n".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Request failed with status code 404: movie not found"
        );
    }

    #[test]
    fn test_user_message_without_body() {
        let err = AppError::from(ApiError::Status {
            status: 500,
            body: String::new(),
        });
        assert_eq!(err.user_message(), "Request failed with status code 500");
    }
}
