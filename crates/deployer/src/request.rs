use {
    crate::{config::Configuration, error::ContractError},
    alloy::{
        dyn_abi::{JsonAbiExt, Specifier},
        json_abi::JsonAbi,
        primitives::Bytes,
    },
    qkcrpc::{FullShardKey, TransactionRequest},
};

/// A contract creation that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    init_code: Bytes,
    full_shard_key: FullShardKey,
    gas_limit: u64,
    gas_price: u128,
}

impl DeploymentRequest {
    pub fn new(config: &Configuration) -> Result<Self, ContractError> {
        let arguments =
            encode_constructor_arguments(&config.artifact.abi, &config.constructor_args)?;
        let mut init_code = config.artifact.bytecode.to_vec();
        init_code.extend_from_slice(&arguments);
        Ok(Self {
            init_code: init_code.into(),
            full_shard_key: config.full_shard_key,
            gas_limit: config.gas_limit,
            gas_price: config.gas_price,
        })
    }

    /// Bytecode followed by the ABI encoded constructor arguments.
    pub fn init_code(&self) -> &Bytes {
        &self.init_code
    }

    /// Contracts are deployed on the shard they are sent from.
    pub fn transaction(&self) -> TransactionRequest {
        TransactionRequest {
            to: None,
            to_full_shard_key: self.full_shard_key,
            value: 0,
            data: self.init_code.clone(),
            gas_limit: self.gas_limit,
            gas_price: self.gas_price,
        }
    }
}

/// Coerces textual arguments into the constructor's parameter types and ABI
/// encodes them.
pub fn encode_constructor_arguments(
    abi: &JsonAbi,
    arguments: &[String],
) -> Result<Vec<u8>, ContractError> {
    let Some(constructor) = &abi.constructor else {
        return match arguments.len() {
            0 => Ok(Vec::new()),
            actual => Err(ContractError::ArgumentCount {
                expected: 0,
                actual,
            }),
        };
    };
    if constructor.inputs.len() != arguments.len() {
        return Err(ContractError::ArgumentCount {
            expected: constructor.inputs.len(),
            actual: arguments.len(),
        });
    }

    let values = constructor
        .inputs
        .iter()
        .zip(arguments)
        .map(|(param, value)| {
            let invalid = |reason: String| ContractError::Argument {
                name: param.name.clone(),
                ty: param.ty.clone(),
                value: value.clone(),
                reason,
            };
            param
                .resolve()
                .map_err(|err| invalid(err.to_string()))?
                .coerce_str(value.trim())
                .map_err(|err| invalid(err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    constructor
        .abi_encode_input(&values)
        .map_err(|err| ContractError::Encoding(err.to_string()))
}
