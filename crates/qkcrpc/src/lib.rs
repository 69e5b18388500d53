//! Client side of a sharded EVM chain (QuarkChain style): account and
//! transaction identifiers that carry a full shard key, the EVM transaction
//! wire format, the JSON-RPC methods needed to deploy a contract and a
//! [`Client`] tying those together with a local signer.

mod address;
mod client;
mod error;
mod network;
pub mod rpc;
pub mod transaction;

pub use {
    address::{QkcAddress, TransactionId},
    client::{Client, TransactionRequest},
    error::{Error, ParseError},
    network::{FullShardKey, Network},
    rpc::{HttpRpc, Receipt, Rpc},
};

#[cfg(any(test, feature = "test-util"))]
pub use rpc::MockRpc;
