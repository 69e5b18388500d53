use {
    crate::{
        arguments::Arguments,
        artifact::{Artifact, ArtifactError},
    },
    alloy::signers::local::{LocalSignerError, PrivateKeySigner},
    qkcrpc::{FullShardKey, Network, ParseError},
    std::{path::PathBuf, time::Duration},
    url::Url,
};

/// Everything a deployment needs, validated before anything is sent to the
/// node.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub node_url: Url,
    pub network: Network,
    pub signer: PrivateKeySigner,
    pub full_shard_key: FullShardKey,
    pub constructor_args: Vec<String>,
    pub artifact: Artifact,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub poll_interval: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no signing key configured (set PK or --private-key)")]
    MissingSigningKey,
    #[error("signing key is invalid: {0}")]
    InvalidSigningKey(#[source] LocalSignerError),
    #[error("no full shard key configured (set FULLSHARDKEY or --full-shard-key)")]
    MissingFullShardKey,
    #[error("full shard key is invalid: {0}")]
    InvalidFullShardKey(#[source] ParseError),
    #[error("artifact {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },
    #[error("gas limit must be positive")]
    ZeroGasLimit,
}

impl Configuration {
    pub fn from_arguments(args: &Arguments) -> Result<Self, ConfigurationError> {
        let signer = non_empty(args.private_key.as_deref())
            .ok_or(ConfigurationError::MissingSigningKey)?
            .parse::<PrivateKeySigner>()
            .map_err(ConfigurationError::InvalidSigningKey)?;
        let full_shard_key = non_empty(args.full_shard_key.as_deref())
            .ok_or(ConfigurationError::MissingFullShardKey)?
            .parse::<FullShardKey>()
            .map_err(ConfigurationError::InvalidFullShardKey)?;
        if args.gas_limit == 0 {
            return Err(ConfigurationError::ZeroGasLimit);
        }
        let artifact =
            Artifact::load(&args.artifact).map_err(|source| ConfigurationError::Artifact {
                path: args.artifact.clone(),
                source,
            })?;

        Ok(Self {
            node_url: args.node_url.clone(),
            network: args.network,
            signer,
            full_shard_key,
            constructor_args: constructor_args(args),
            artifact,
            gas_limit: args.gas_limit,
            gas_price: args.gas_price,
            poll_interval: args.poll_interval,
        })
    }
}

fn constructor_args(args: &Arguments) -> Vec<String> {
    match non_empty(args.factory_address.as_deref()) {
        Some(factory) if args.constructor_args.is_empty() => vec![factory.to_owned()],
        _ => args.constructor_args.clone(),
    }
}

/// An environment variable that is set but empty counts as missing.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
