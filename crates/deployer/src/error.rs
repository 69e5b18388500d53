use {
    crate::config::ConfigurationError,
    qkcrpc::{QkcAddress, TransactionId},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("transport error: {0}")]
    Transport(#[from] qkcrpc::Error),
    #[error("contract error: {0}")]
    Contract(#[from] ContractError),
}

/// The contract cannot be created as requested.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("constructor takes {expected} arguments but {actual} were given")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("constructor argument {name:?} ({ty}) cannot be {value:?}: {reason}")]
    Argument {
        name: String,
        ty: String,
        value: String,
        reason: String,
    },
    #[error("failed to encode constructor arguments: {0}")]
    Encoding(String),
    #[error("deployment transaction {0} reverted")]
    Reverted(TransactionId),
    #[error("receipt of {0} has no contract address")]
    MissingAddress(TransactionId),
    #[error("the contract code couldn't be stored at {0}, please check your gas limit")]
    CodeNotStored(QkcAddress),
}
