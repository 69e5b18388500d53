use {
    crate::ParseError,
    std::{
        fmt::{self, Display, Formatter},
        str::FromStr,
    },
};

/// The network a transaction is meant for. The network id is part of every
/// signed transaction so a transaction signed for one network can never be
/// replayed on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Network {
    Main,
    Dev,
}

impl Network {
    pub fn id(self) -> u32 {
        match self {
            Self::Main => 0x1,
            Self::Dev => 0xff,
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Dev => write!(f, "dev"),
        }
    }
}

/// Routing key selecting the shard that processes a transaction. Addresses
/// and transaction ids carry it in their last 4 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FullShardKey(pub u32);

impl FullShardKey {
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

/// Accepts `0x` prefixed hex or plain decimal.
impl FromStr for FullShardKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => s.parse(),
        };
        parsed
            .map(Self)
            .map_err(|_| ParseError::FullShardKey(s.to_owned()))
    }
}

impl Display for FullShardKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
