//! NEAR JSON-RPC error types.
use serde::Deserialize;

/// Errors returned by the [client](crate::Client).
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The request never produced a usable reply: connect failures, timeouts
    /// and non-2xx statuses without a JSON-RPC error body.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The node answered with a JSON-RPC error object.
    #[error(transparent)]
    Node(#[from] NodeError),
    /// The reply could not be interpreted.
    #[error("invalid reply: {0}")]
    InvalidReply(String),
}

/// The ways an [RpcError] influences the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RpcErrorKind {
    /// The node no longer serves the requested block. Older history has to be
    /// retrieved out of band.
    HistoryPruned,
    /// Everything else. The request may succeed when repeated later.
    Connectivity,
}

impl RpcError {
    pub fn kind(&self) -> RpcErrorKind {
        match self {
            RpcError::Node(e) if e.is_history_pruned() => RpcErrorKind::HistoryPruned,
            _ => RpcErrorKind::Connectivity,
        }
    }

    /// `true` if the node does not know the requested block.
    ///
    /// Besides pruned history this is also the answer for a height at which no
    /// block was produced.
    pub fn is_unknown_block(&self) -> bool {
        match self {
            RpcError::Node(e) => {
                e.name == Some(KnownErrorName::HandlerError.into())
                    && e.cause.as_ref().is_some_and(|c| c.name == "UNKNOWN_BLOCK")
            }
            _ => false,
        }
    }
}

/// A JSON-RPC error object as produced by nearcore.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NodeError {
    #[serde(default)]
    pub name: Option<ErrorName>,
    #[serde(default)]
    pub cause: Option<ErrorCause>,
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl NodeError {
    fn is_history_pruned(&self) -> bool {
        if self.name != Some(KnownErrorName::HandlerError.into()) {
            return false;
        }

        match &self.cause {
            None => true,
            Some(cause) => matches!(cause.name.as_str(), "UNKNOWN_BLOCK" | "GARBAGE_COLLECTED_BLOCK"),
        }
    }
}

impl std::error::Error for NodeError {}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause.name)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ErrorCause {
    pub name: String,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
}

/// Top level error category reported by the node.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorName {
    Known(KnownErrorName),
    Unknown(String),
}

impl From<KnownErrorName> for ErrorName {
    fn from(value: KnownErrorName) -> Self {
        Self::Known(value)
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum KnownErrorName {
    #[serde(rename = "HANDLER_ERROR")]
    HandlerError,
    #[serde(rename = "REQUEST_VALIDATION_ERROR")]
    RequestValidationError,
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}
