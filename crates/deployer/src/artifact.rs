//! Compiled contract artifacts.

use {
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    serde::Deserialize,
    std::path::Path,
};

/// What the deployer needs from a compiled contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub abi: JsonAbi,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bytecode is not valid hex: {0}")]
    Bytecode(#[from] const_hex::FromHexError),
    #[error("bytecode is empty")]
    EmptyBytecode,
}

/// waffle and truffle store the bytecode as a (possibly unprefixed) hex
/// string, forge nests it in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    bytecode: RawBytecode,
}

impl Artifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let json = std::fs::read_to_string(path)?;
        let artifact = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            bytecode_len = artifact.bytecode.len(),
            has_constructor = artifact.abi.constructor.is_some(),
            "loaded artifact"
        );
        Ok(artifact)
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(json)?;
        let bytecode = match raw.bytecode {
            RawBytecode::Hex(hex) | RawBytecode::Object { object: hex } => {
                const_hex::decode(hex.trim())?
            }
        };
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode);
        }
        Ok(Self {
            abi: raw.abi,
            bytecode: bytecode.into(),
        })
    }
}
