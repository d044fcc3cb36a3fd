//! The uniform result envelope returned by every post operation.
//!
//! On the wire an envelope is always the same object:
//!
//! ```json
//! { "is_success": true, "data": { ... }, "message": null, "errors": [] }
//! ```
//!
//! In Rust it is a two-variant enum, so a success can never carry errors and a
//! failure can never carry data.

use serde::de::{Error as _, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of an operation: either data or a human-readable failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Success {
        data: T,
        message: Option<String>,
    },
    Failure {
        message: String,
        errors: Vec<String>,
    },
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::Success {
            data,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn failure_with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Failure {
            message: message.into(),
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failure { message, .. } => Some(message),
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors, .. } => errors,
        }
    }

    /// Transform the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success { data, message } => ApiResponse::Success {
                data: f(data),
                message,
            },
            Self::Failure { message, errors } => ApiResponse::Failure { message, errors },
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    is_success: bool,
    data: Option<&'a T>,
    message: Option<&'a str>,
    errors: &'a [String],
}

#[derive(Deserialize)]
struct Envelope<T> {
    is_success: bool,
    data: Option<T>,
    message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EnvelopeRef {
            is_success: self.is_success(),
            data: self.data(),
            message: self.message(),
            errors: self.errors(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = Envelope::<T>::deserialize(deserializer)?;

        if envelope.is_success {
            // `null` data is only a valid success for payloads that accept unit,
            // such as `ApiResponse<()>`.
            let data = match envelope.data {
                Some(data) => data,
                None => T::deserialize(().into_deserializer())
                    .map_err(|_: D::Error| D::Error::missing_field("data"))?,
            };
            Ok(Self::Success {
                data,
                message: envelope.message,
            })
        } else {
            Ok(Self::Failure {
                message: envelope.message.unwrap_or_default(),
                errors: envelope.errors,
            })
        }
    }
}
