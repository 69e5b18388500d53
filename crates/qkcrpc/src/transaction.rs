//! The EVM transaction of the sharded chain and its wire encoding.
//!
//! On top of the usual legacy EVM fields a transaction names the network it
//! is valid for, the shards of sender and recipient and the tokens used to
//! pay for gas and to transfer value. It is RLP encoded as
//!
//! ```text
//! [nonce, gas_price, gas_limit, to, value, data, network_id,
//!  from_full_shard_key, to_full_shard_key, gas_token_id, transfer_token_id,
//!  version, v, r, s]
//! ```
//!
//! and signed over the keccak hash of the list of the first eleven fields.

use {
    crate::{Error, FullShardKey},
    alloy::{
        primitives::{Address, B256, Bytes, Signature, keccak256},
        rlp::{BufMut, EMPTY_STRING_CODE, Encodable, Header},
        signers::SignerSync,
    },
};

/// Token id of the chain's native token, used by default for both gas
/// payments and value transfers.
pub const NATIVE_TOKEN_ID: u64 = 0x8bb0;

/// Only version 0 transactions (signed over the RLP hash) are produced.
const VERSION: u64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// `None` creates a contract with `data` as init code.
    pub to: Option<Address>,
    pub value: u128,
    pub data: Bytes,
    pub network_id: u32,
    pub from_full_shard_key: FullShardKey,
    pub to_full_shard_key: FullShardKey,
    pub gas_token_id: u64,
    pub transfer_token_id: u64,
}

impl Transaction {
    pub fn is_creation(&self) -> bool {
        self.to.is_none()
    }

    /// The hash the sender signs.
    pub fn signing_hash(&self) -> B256 {
        let mut payload = Vec::new();
        self.encode_unsigned_fields(&mut payload);
        keccak256(rlp_list(&payload))
    }

    pub fn sign(self, signer: &(impl SignerSync + ?Sized)) -> Result<SignedTransaction, Error> {
        let signature = signer.sign_hash_sync(&self.signing_hash())?;
        Ok(SignedTransaction {
            transaction: self,
            signature,
        })
    }

    fn encode_unsigned_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        match &self.to {
            Some(to) => to.as_slice().encode(out),
            None => out.put_u8(EMPTY_STRING_CODE),
        }
        self.value.encode(out);
        self.data[..].encode(out);
        self.network_id.encode(out);
        self.from_full_shard_key.to_be_bytes().encode(out);
        self.to_full_shard_key.to_be_bytes().encode(out);
        self.gas_token_id.encode(out);
        self.transfer_token_id.encode(out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: Signature,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Recovers the address that signed the transaction.
    pub fn recover_signer(&self) -> Option<Address> {
        self.signature
            .recover_address_from_prehash(&self.transaction.signing_hash())
            .ok()
    }

    /// The raw bytes accepted by `sendRawTransaction`.
    pub fn encoded(&self) -> Bytes {
        let mut payload = Vec::new();
        self.transaction.encode_unsigned_fields(&mut payload);
        VERSION.encode(&mut payload);
        (27 + u64::from(self.signature.v())).encode(&mut payload);
        self.signature.r().encode(&mut payload);
        self.signature.s().encode(&mut payload);
        rlp_list(&payload).into()
    }
}

fn rlp_list(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    Header {
        list: true,
        payload_length: payload.len(),
    }
    .encode(&mut out);
    out.extend_from_slice(payload);
    out
}
