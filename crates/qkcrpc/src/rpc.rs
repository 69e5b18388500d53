//! The node methods used to deploy contracts.

use {
    crate::{Error, QkcAddress, TransactionId},
    alloy::{
        primitives::{Bytes, U64},
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    serde::Deserialize,
    std::str::FromStr,
    url::Url,
};

/// JSON-RPC surface of a node. Abstracted so the deployment workflow can be
/// driven against a mock.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Rpc: Send + Sync {
    /// Number of transactions sent from `address`, i.e. the next nonce.
    async fn transaction_count(&self, address: QkcAddress) -> Result<u64, Error>;

    /// Broadcasts a signed and encoded transaction.
    async fn send_raw_transaction(&self, transaction: Bytes) -> Result<TransactionId, Error>;

    /// Returns `None` while the transaction is not mined yet.
    async fn transaction_receipt(&self, id: TransactionId) -> Result<Option<Receipt>, Error>;

    /// The code stored at `address` (empty for accounts without code).
    async fn code(&self, address: QkcAddress) -> Result<Bytes, Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// `true` if the transaction executed without reverting.
    pub success: bool,
    /// Set for contract creations.
    pub contract_address: Option<QkcAddress>,
    pub gas_used: Option<u64>,
    pub block_height: Option<u64>,
}

/// The receipt as the node returns it. A failed creation reports an all zero
/// contract address.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    #[serde(with = "alloy::serde::quantity")]
    status: u64,
    contract_address: Option<String>,
    #[serde(default, with = "alloy::serde::quantity::opt")]
    gas_used: Option<u64>,
    #[serde(default, with = "alloy::serde::quantity::opt")]
    block_height: Option<u64>,
}

impl TryFrom<RawReceipt> for Receipt {
    type Error = Error;

    fn try_from(raw: RawReceipt) -> Result<Self, Self::Error> {
        let contract_address = raw
            .contract_address
            .filter(|address| !address.is_empty())
            .map(|address| QkcAddress::from_str(&address))
            .transpose()
            .map_err(|err| Error::response("getTransactionReceipt", err))?
            .filter(|address| !address.recipient.is_zero());
        Ok(Self {
            success: raw.status == 1,
            contract_address,
            gas_used: raw.gas_used,
            block_height: raw.block_height,
        })
    }
}

/// [`Rpc`] implementation talking JSON-RPC over HTTP.
#[derive(Clone)]
pub struct HttpRpc {
    provider: DynProvider,
}

impl HttpRpc {
    pub fn new(url: &Url) -> Self {
        let rpc = ClientBuilder::default().http(url.clone());
        Self::with_provider(ProviderBuilder::new().connect_client(rpc).erased())
    }

    pub fn with_provider(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl Rpc for HttpRpc {
    async fn transaction_count(&self, address: QkcAddress) -> Result<u64, Error> {
        let count: U64 = self
            .provider
            .raw_request("getTransactionCount".into(), (address.to_string(),))
            .await?;
        Ok(count.to())
    }

    async fn send_raw_transaction(&self, transaction: Bytes) -> Result<TransactionId, Error> {
        let id: String = self
            .provider
            .raw_request(
                "sendRawTransaction".into(),
                (const_hex::encode_prefixed(&transaction),),
            )
            .await?;
        id.parse()
            .map_err(|err| Error::response("sendRawTransaction", err))
    }

    async fn transaction_receipt(&self, id: TransactionId) -> Result<Option<Receipt>, Error> {
        let receipt: Option<RawReceipt> = self
            .provider
            .raw_request("getTransactionReceipt".into(), (id.to_string(),))
            .await?;
        receipt.map(Receipt::try_from).transpose()
    }

    async fn code(&self, address: QkcAddress) -> Result<Bytes, Error> {
        let code: String = self
            .provider
            .raw_request("getCode".into(), (address.to_string(),))
            .await?;
        code.parse().map_err(|err| Error::response("getCode", err))
    }
}
