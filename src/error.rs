use crate::config::ConfigError;
use crate::data::RequestError;
use crate::domain::FormError;
use crate::wizard::SessionError;

/// Top-level error carried back to `main`.
///
/// Exit codes: `2` for usage/config/input problems, `4` for runtime failures
/// (network, terminal, filesystem).
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::new(2, value.to_string())
    }
}

impl From<FormError> for AppError {
    fn from(value: FormError) -> Self {
        Self::new(2, value.to_string())
    }
}

impl From<RequestError> for AppError {
    fn from(value: RequestError) -> Self {
        Self::new(4, format!("Prediction request failed: {value}"))
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::new(4, value.to_string())
    }
}
