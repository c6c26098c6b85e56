use core::fmt;

/// Failure returned by a JSON encoder.
///
/// Generated encoders never produce one on their own: they only forward the
/// error of a nested message's encoder, unchanged. Hand-written encoders for
/// extern messages create them with [`EncodeError::custom`].
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{0}")]
    Custom(String),
    #[error("failed to encode `{type_name}`: {reason}")]
    Message {
        type_name: &'static str,
        reason: String,
    },
}

impl EncodeError {
    /// An error carrying an arbitrary message.
    pub fn custom(msg: impl fmt::Display) -> Self {
        EncodeError::Custom(msg.to_string())
    }

    /// An error attributed to a specific message type.
    pub fn message(type_name: &'static str, reason: impl fmt::Display) -> Self {
        EncodeError::Message {
            type_name,
            reason: reason.to_string(),
        }
    }
}
