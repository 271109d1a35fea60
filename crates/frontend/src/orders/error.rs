use thiserror::Error;

use super::validator::FieldError;

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while loading orders. Please try again.";
pub const INVALID_INPUT_MESSAGE: &str = "Please check your filter inputs for errors.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("filter inputs are invalid ({} field(s))", .0.len())]
    Validation(Vec<FieldError>),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("filter error: {0}")]
    Api(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FilterError {
    /// Text for the status banner. Transport-level failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            FilterError::Validation(_) => INVALID_INPUT_MESSAGE.to_string(),
            FilterError::Api(message) => format!("Filter error: {}", message),
            FilterError::Transport(_) | FilterError::Status(_) | FilterError::Decode(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_details_are_not_shown_to_users() {
        assert_eq!(
            FilterError::Status(502).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            FilterError::Transport("connection reset".to_string()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            FilterError::Api("bad column".to_string()).user_message(),
            "Filter error: bad column"
        );
    }
}
