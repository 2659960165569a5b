use std::fmt;

#[derive(Debug, Clone)]
pub enum NumfieldError {
    ConfigError(String),
    InvalidPattern(String),
    UnknownField(String),
    InvalidArgument(String),
}

impl fmt::Display for NumfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumfieldError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            NumfieldError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
            NumfieldError::UnknownField(name) => write!(f, "Unknown field: {}", name),
            NumfieldError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for NumfieldError {}
