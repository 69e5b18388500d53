use {
    crate::{
        Error,
        FullShardKey,
        HttpRpc,
        Network,
        QkcAddress,
        Rpc,
        TransactionId,
        transaction::{NATIVE_TOKEN_ID, Transaction},
    },
    alloy::{
        primitives::{Address, Bytes},
        signers::local::PrivateKeySigner,
    },
    url::Url,
};

/// A transaction before the client fills in sender, nonce and network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    /// `None` creates a contract.
    pub to: Option<Address>,
    pub to_full_shard_key: FullShardKey,
    pub value: u128,
    pub data: Bytes,
    pub gas_limit: u64,
    pub gas_price: u128,
}

/// Connection to one node of one network, optionally able to author
/// transactions with a locally registered key.
pub struct Client {
    rpc: Box<dyn Rpc>,
    network: Network,
    wallet: Option<Wallet>,
}

struct Wallet {
    signer: PrivateKeySigner,
    full_shard_key: FullShardKey,
}

impl Wallet {
    fn address(&self) -> QkcAddress {
        QkcAddress::new(self.signer.address(), self.full_shard_key)
    }
}

impl Client {
    pub fn new(rpc: Box<dyn Rpc>, network: Network) -> Self {
        Self {
            rpc,
            network,
            wallet: None,
        }
    }

    /// Connects to the node at `url` over HTTP.
    pub fn http(url: &Url, network: Network) -> Self {
        Self::new(Box::new(HttpRpc::new(url)), network)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn rpc(&self) -> &dyn Rpc {
        self.rpc.as_ref()
    }

    /// Registers the key transactions get signed with, so no external wallet
    /// has to approve them. The key sends from the shard `full_shard_key`.
    /// Replaces a previously registered key.
    pub fn register_signer(
        &mut self,
        signer: PrivateKeySigner,
        full_shard_key: FullShardKey,
    ) -> QkcAddress {
        let wallet = Wallet {
            signer,
            full_shard_key,
        };
        let address = wallet.address();
        self.wallet = Some(wallet);
        address
    }

    /// Address of the registered signer.
    pub fn address(&self) -> Option<QkcAddress> {
        self.wallet.as_ref().map(Wallet::address)
    }

    /// Signs the request with the registered key using the sender's next
    /// nonce and broadcasts it.
    pub async fn send_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionId, Error> {
        let wallet = self.wallet.as_ref().ok_or(Error::MissingSigner)?;
        let from = wallet.address();
        let nonce = self.rpc.transaction_count(from).await?;
        let transaction = Transaction {
            nonce,
            gas_price: request.gas_price,
            gas_limit: request.gas_limit,
            to: request.to,
            value: request.value,
            data: request.data,
            network_id: self.network.id(),
            from_full_shard_key: wallet.full_shard_key,
            to_full_shard_key: request.to_full_shard_key,
            gas_token_id: NATIVE_TOKEN_ID,
            transfer_token_id: NATIVE_TOKEN_ID,
        };
        tracing::debug!(
            %from,
            nonce,
            network = %self.network,
            creation = transaction.is_creation(),
            "signing transaction"
        );
        let signed = transaction.sign(&wallet.signer)?;
        self.rpc.send_raw_transaction(signed.encoded()).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::MockRpc,
        alloy::primitives::B256,
        hex_literal::hex,
        mockall::predicate::eq,
    };

    fn signer() -> PrivateKeySigner {
        "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
            .parse()
            .unwrap()
    }

    fn creation() -> TransactionRequest {
        TransactionRequest {
            to: None,
            to_full_shard_key: FullShardKey(1),
            value: 0,
            data: Bytes::from_static(&[0x60, 0x01]),
            gas_limit: 5_000_000,
            gas_price: 1_000_000_000,
        }
    }

    #[tokio::test]
    async fn requires_registered_signer() {
        let client = Client::new(Box::new(MockRpc::new()), Network::Dev);

        assert_eq!(client.address(), None);
        assert!(matches!(
            client.send_transaction(creation()).await,
            Err(Error::MissingSigner)
        ));
    }

    #[tokio::test]
    async fn signs_with_nonce_and_network() {
        let signer = signer();
        let sender = QkcAddress::new(signer.address(), FullShardKey(1));
        let id = TransactionId {
            hash: B256::repeat_byte(1),
            full_shard_key: FullShardKey(1),
        };
        let expected = Bytes::from_static(&hex!(
            "f865"
            "03843b9aca00834c4b40808082600181ff84000000018400000001828bb0828bb0"
            "801c"
            "a0527835774fc7db72b4deb41ba9b97f8b2150aa70f247bae8dfb56311c0fb3bfb"
            "a04e9888550105ba3cdd54b559260f1d383b9e3566e8c0c324d785e5c44fd231d0"
        ));

        let mut rpc = MockRpc::new();
        rpc.expect_transaction_count()
            .with(eq(sender))
            .times(1)
            .returning(|_| Ok(3));
        rpc.expect_send_raw_transaction()
            .with(eq(expected))
            .times(1)
            .returning(move |_| Ok(id));

        let mut client = Client::new(Box::new(rpc), Network::Dev);
        assert_eq!(client.register_signer(signer, FullShardKey(1)), sender);
        assert_eq!(client.address(), Some(sender));
        assert_eq!(client.send_transaction(creation()).await.unwrap(), id);
    }

    #[tokio::test]
    async fn does_not_send_without_nonce() {
        let mut rpc = MockRpc::new();
        rpc.expect_transaction_count().returning(|_| {
            Err(Error::response("getTransactionCount", "unexpected null"))
        });
        rpc.expect_send_raw_transaction().never();

        let mut client = Client::new(Box::new(rpc), Network::Main);
        client.register_signer(signer(), FullShardKey(0));
        assert!(matches!(
            client.send_transaction(creation()).await,
            Err(Error::Response { .. })
        ));
    }
}
