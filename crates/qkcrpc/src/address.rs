use {
    crate::{FullShardKey, ParseError},
    alloy::primitives::{Address, B256},
    std::{
        fmt::{self, Debug, Display, Formatter},
        str::FromStr,
    },
};

/// An account on a specific shard: the 20 byte EVM address followed by the
/// 4 byte full shard key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct QkcAddress {
    pub recipient: Address,
    pub full_shard_key: FullShardKey,
}

impl QkcAddress {
    pub const LEN: usize = 24;

    pub fn new(recipient: Address, full_shard_key: FullShardKey) -> Self {
        Self {
            recipient,
            full_shard_key,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0; Self::LEN];
        bytes[..20].copy_from_slice(self.recipient.as_slice());
        bytes[20..].copy_from_slice(&self.full_shard_key.to_be_bytes());
        bytes
    }
}

impl FromStr for QkcAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_fixed::<{ Self::LEN }>(s)?;
        let (recipient, full_shard_key) = split_full_shard_key(&bytes);
        Ok(Self {
            recipient: Address::from_slice(recipient),
            full_shard_key,
        })
    }
}

impl Display for QkcAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&const_hex::encode_prefixed(self.to_bytes()))
    }
}

impl Debug for QkcAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Identifies a transaction across shards: the transaction hash followed by
/// the full shard key of the sender.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId {
    pub hash: B256,
    pub full_shard_key: FullShardKey,
}

impl TransactionId {
    pub const LEN: usize = 36;

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0; Self::LEN];
        bytes[..32].copy_from_slice(self.hash.as_slice());
        bytes[32..].copy_from_slice(&self.full_shard_key.to_be_bytes());
        bytes
    }
}

impl FromStr for TransactionId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_fixed::<{ Self::LEN }>(s)?;
        let (hash, full_shard_key) = split_full_shard_key(&bytes);
        Ok(Self {
            hash: B256::from_slice(hash),
            full_shard_key,
        })
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&const_hex::encode_prefixed(self.to_bytes()))
    }
}

impl Debug for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    let bytes = const_hex::decode(s.trim())?;
    bytes.try_into().map_err(|bytes: Vec<u8>| ParseError::Length {
        expected: N,
        actual: bytes.len(),
    })
}

fn split_full_shard_key(bytes: &[u8]) -> (&[u8], FullShardKey) {
    let (head, key) = bytes.split_at(bytes.len() - 4);
    let key: [u8; 4] = key.try_into().expect("split leaves exactly 4 bytes");
    (head, FullShardKey::from_be_bytes(key))
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[test]
    fn address_roundtrips_through_text() {
        let text = "0x33f7b5a3ff5aa4c2e5a7fbb4c53a3ae4b8e06f1400000001";
        let parsed: QkcAddress = text.parse().unwrap();

        assert_eq!(
            parsed.recipient,
            address!("33f7b5a3ff5aa4c2e5a7fbb4c53a3ae4b8e06f14")
        );
        assert_eq!(parsed.full_shard_key, FullShardKey(1));
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn address_rejects_plain_evm_address() {
        let err = "0x33f7b5a3ff5aa4c2e5a7fbb4c53a3ae4b8e06f14"
            .parse::<QkcAddress>()
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Length {
                expected: 24,
                actual: 20
            }
        );
    }

    #[test]
    fn transaction_id_splits_hash_and_shard() {
        let text = format!("0x{}{}", "ab".repeat(32), "0000ffff");
        let id: TransactionId = text.parse().unwrap();

        assert_eq!(id.hash, B256::repeat_byte(0xab));
        assert_eq!(id.full_shard_key, FullShardKey(0xffff));
        assert_eq!(id.to_string(), text);
    }

    #[test]
    fn transaction_id_rejects_bad_hex() {
        assert!(matches!(
            "0xTX1".parse::<TransactionId>(),
            Err(ParseError::Hex(_))
        ));
    }
}
