use alloy::transports::TransportError;

/// Errors of the node connection. Everything that can go wrong between
/// handing a request to the [`crate::Client`] and getting the node's answer
/// back ends up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rpc transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed {method} response: {reason}")]
    Response {
        method: &'static str,
        reason: String,
    },
    #[error("no signer registered with the client")]
    MissingSigner,
    #[error("failed to sign transaction: {0}")]
    Signing(#[from] alloy::signers::Error),
}

impl Error {
    pub(crate) fn response(method: &'static str, reason: impl ToString) -> Self {
        Self::Response {
            method,
            reason: reason.to_string(),
        }
    }
}

/// Errors parsing the chain's textual identifiers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid hex: {0}")]
    Hex(#[from] const_hex::FromHexError),
    #[error("expected {expected} bytes but got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("full shard key {0:?} is not a 32 bit integer")]
    FullShardKey(String),
}
