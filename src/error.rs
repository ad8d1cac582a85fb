use aws_sdk_ssm::error::BuildError;
use serde::de::value::Error as DecodeError;
use std::error::Error;
use std::fmt;

pub type Result<T> = std::result::Result<T, ParamStoreError>;

#[derive(Debug)]
pub enum ParamStoreError {
    /// Empty parameter name, rejected before any request is built.
    InvalidName,
    NotFound(String),
    AlreadyExists(String),
    /// Any other failure reported by the SDK or the service, kept as-is.
    Transport(Box<aws_sdk_ssm::Error>),
    InvalidRequest(BuildError),
    RepeatedToken(String),
    Serialization(serde_json::Error),
    /// A stored value did not fit the target field's type.
    Decode(DecodeError),
}

impl fmt::Display for ParamStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamStoreError::InvalidName => write!(f, "invalid parameter name"),
            ParamStoreError::NotFound(name) => write!(f, "parameter not found: {}", name),
            ParamStoreError::AlreadyExists(name) => {
                write!(f, "parameter already exists: {}", name)
            }
            ParamStoreError::Transport(e) => write!(f, "SSM request failed: {}", e),
            ParamStoreError::InvalidRequest(e) => write!(f, "invalid SSM request: {}", e),
            ParamStoreError::RepeatedToken(token) => write!(
                f,
                "SSM returned the same continuation token twice: {}",
                token
            ),
            ParamStoreError::Serialization(e) => write!(f, "JSON serialization error: {}", e),
            ParamStoreError::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

impl Error for ParamStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParamStoreError::Transport(e) => Some(e.as_ref()),
            ParamStoreError::InvalidRequest(e) => Some(e),
            ParamStoreError::Serialization(e) => Some(e),
            ParamStoreError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<aws_sdk_ssm::Error> for ParamStoreError {
    fn from(error: aws_sdk_ssm::Error) -> Self {
        ParamStoreError::Transport(Box::new(error))
    }
}

impl From<BuildError> for ParamStoreError {
    fn from(error: BuildError) -> Self {
        ParamStoreError::InvalidRequest(error)
    }
}

impl From<serde_json::Error> for ParamStoreError {
    fn from(error: serde_json::Error) -> Self {
        ParamStoreError::Serialization(error)
    }
}

impl From<DecodeError> for ParamStoreError {
    fn from(error: DecodeError) -> Self {
        ParamStoreError::Decode(error)
    }
}
