//! The deployment workflow.
//!
//! A deployment goes through `Idle -> Submitted -> Confirmed` or fails once,
//! either while submitting or while waiting for confirmation. There are no
//! retries, no cancellation and no timeout: until the node reports a receipt
//! the transaction is polled for.

use {
    crate::{
        error::{ContractError, Error},
        request::DeploymentRequest,
    },
    futures::{StreamExt, stream::BoxStream},
    qkcrpc::{Client, QkcAddress, TransactionId},
    std::{
        sync::{Arc, OnceLock},
        time::Duration,
    },
};

/// Handle to a submitted deployment. Clones share state: a handle obtained
/// when the deployment was submitted reports the contract address once the
/// deployment is confirmed.
#[derive(Debug, Clone)]
pub struct Deployment(Arc<State>);

#[derive(Debug)]
struct State {
    transaction_id: TransactionId,
    address: OnceLock<QkcAddress>,
}

impl Deployment {
    fn submitted(transaction_id: TransactionId) -> Self {
        Self(Arc::new(State {
            transaction_id,
            address: OnceLock::new(),
        }))
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.0.transaction_id
    }

    /// `None` until the deployment is confirmed.
    pub fn address(&self) -> Option<QkcAddress> {
        self.0.address.get().copied()
    }

    /// Whether both handles refer to the same deployment.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn confirm(&self, address: QkcAddress) {
        // Only `PendingDeployment::confirm` sets the address and it consumes
        // the pending deployment.
        let _ = self.0.address.set(address);
    }
}

#[derive(Debug, Clone)]
pub enum Notification {
    /// The node accepted the transaction, it is not mined yet.
    Submitted(Deployment),
    /// The transaction is mined and the contract lives at
    /// [`Deployment::address`].
    Confirmed(Deployment),
}

impl Notification {
    pub fn deployment(&self) -> &Deployment {
        match self {
            Self::Submitted(deployment) | Self::Confirmed(deployment) => deployment,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Deployer<'a> {
    client: &'a Client,
    poll_interval: Duration,
}

impl<'a> Deployer<'a> {
    /// The client needs a registered signer to submit deployments.
    pub fn new(client: &'a Client, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }

    /// First stage: signs and broadcasts the creation transaction.
    pub async fn submit(
        &self,
        request: &DeploymentRequest,
    ) -> Result<PendingDeployment<'a>, Error> {
        let transaction_id = self.client.send_transaction(request.transaction()).await?;
        tracing::info!(%transaction_id, "deployment transaction submitted");
        Ok(PendingDeployment {
            client: self.client,
            poll_interval: self.poll_interval,
            deployment: Deployment::submitted(transaction_id),
        })
    }

    /// Both stages as a stream yielding at most two notifications,
    /// `Submitted` then `Confirmed`. A failure is yielded as the last item.
    pub fn deploy<'r>(
        &self,
        request: &'r DeploymentRequest,
    ) -> BoxStream<'r, Result<Notification, Error>>
    where
        'a: 'r,
    {
        let deployer = *self;
        async_stream::stream! {
            let pending = match deployer.submit(request).await {
                Ok(pending) => pending,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            };
            yield Ok(Notification::Submitted(pending.deployment().clone()));
            yield pending.confirm().await.map(Notification::Confirmed);
        }
        .boxed()
    }
}

/// A submitted deployment waiting to be mined.
pub struct PendingDeployment<'a> {
    client: &'a Client,
    poll_interval: Duration,
    deployment: Deployment,
}

impl PendingDeployment<'_> {
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Second stage: waits for the receipt and checks that the contract code
    /// got stored.
    pub async fn confirm(self) -> Result<Deployment, Error> {
        let rpc = self.client.rpc();
        let transaction_id = self.deployment.transaction_id();
        let receipt = loop {
            match rpc.transaction_receipt(transaction_id).await? {
                Some(receipt) => break receipt,
                None => {
                    tracing::debug!(%transaction_id, "deployment not mined yet");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        };
        tracing::debug!(%transaction_id, ?receipt, "deployment mined");

        if !receipt.success {
            return Err(ContractError::Reverted(transaction_id).into());
        }
        let address = receipt
            .contract_address
            .ok_or(ContractError::MissingAddress(transaction_id))?;
        if rpc.code(address).await?.is_empty() {
            return Err(ContractError::CodeNotStored(address).into());
        }

        self.deployment.confirm(address);
        tracing::info!(%transaction_id, %address, "contract deployed");
        Ok(self.deployment)
    }
}
