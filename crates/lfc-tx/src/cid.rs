//! Content identifiers (CIDv1) for encoded transactions.
//!
//! A transaction's CID is derived from its canonical bytes:
//!
//! ```text
//! digest    = keccak-256(bytes)
//! multihash = varint(0x1b) || varint(32) || digest
//! cid       = varint(1) || varint(0x1c01) || multihash
//! string    = "z" || base58btc(cid)
//! ```
//!
//! The derivation is pure: the same bytes always give the same CID.

use std::fmt;
use std::str::FromStr;

use cid::Cid;
use multibase::Base;
use multihash::Multihash;
use sha2::Digest;
use tiny_keccak::{Hasher, Keccak};
use tracing::trace;

use crate::error::CidError;

/// Multicodec for Leofcoin blocks.
pub const CODEC_LEOFCOIN_BLOCK: u64 = 0x1c00;

/// Multicodec for Leofcoin transactions.
pub const CODEC_LEOFCOIN_TX: u64 = 0x1c01;

/// Multicodec for Leofcoin proof records.
pub const CODEC_LEOFCOIN_PR: u64 = 0x1c02;

/// Codec tag of this record format.
pub const CODEC: u64 = CODEC_LEOFCOIN_TX;

/// SHA2-256 multihash code.
pub const SHA2_256: u64 = 0x12;

/// Keccak-256 multihash code.
pub const KECCAK_256: u64 = 0x1b;

/// Hash algorithm used by [`TxCid::new`].
pub const DEFAULT_HASH_ALG: u64 = KECCAK_256;

/// Read-only registry of the multicodec names this crate knows.
pub static CODEC_TABLE: &[(u64, &str)] = &[
    (0x55, "raw"),
    (0x70, "dag-pb"),
    (0x71, "dag-cbor"),
    (CODEC_LEOFCOIN_BLOCK, "leofcoin-block"),
    (CODEC_LEOFCOIN_TX, "leofcoin-tx"),
    (CODEC_LEOFCOIN_PR, "leofcoin-pr"),
];

/// Looks up the registered name of a multicodec.
pub fn codec_name(code: u64) -> Option<&'static str> {
    CODEC_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Digest algorithms a transaction CID may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    #[default]
    Keccak256,
    Sha2_256,
}

impl HashAlgorithm {
    /// Multihash code.
    pub fn code(&self) -> u64 {
        match self {
            HashAlgorithm::Keccak256 => KECCAK_256,
            HashAlgorithm::Sha2_256 => SHA2_256,
        }
    }

    /// Multihash table name.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Keccak256 => "keccak-256",
            HashAlgorithm::Sha2_256 => "sha2-256",
        }
    }

    /// Maps a multihash code back to an algorithm.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            KECCAK_256 => Some(HashAlgorithm::Keccak256),
            SHA2_256 => Some(HashAlgorithm::Sha2_256),
            _ => None,
        }
    }

    /// Hashes `bytes`.
    pub fn digest(&self, bytes: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        match self {
            HashAlgorithm::Keccak256 => {
                let mut keccak = Keccak::v256();
                keccak.update(bytes);
                keccak.finalize(&mut out);
            }
            HashAlgorithm::Sha2_256 => {
                out.copy_from_slice(&sha2::Sha256::digest(bytes));
            }
        }
        out
    }
}

/// Content identifier of an encoded transaction.
///
/// # String form
///
/// Base58btc multibase (`"z..."`), used in logs and by storage layers.
///
/// # Binary form
///
/// Standard CID binary: varint(version=1) + varint(codec) + multihash.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TxCid(Cid);

impl TxCid {
    /// Hashes `bytes` with the default algorithm (keccak-256).
    pub fn new(bytes: &[u8]) -> Self {
        Self::with_hash(bytes, HashAlgorithm::default())
    }

    /// Hashes `bytes` with `algorithm`.
    pub fn with_hash(bytes: &[u8], algorithm: HashAlgorithm) -> Self {
        let digest = algorithm.digest(bytes);
        // 32-byte digests always fit in Multihash<64>.
        let mh = Multihash::<64>::wrap(algorithm.code(), &digest)
            .expect("32-byte digest fits in Multihash<64>");
        let cid = Cid::new_v1(CODEC, mh);
        trace!(len = bytes.len(), hash = algorithm.name(), "computed transaction cid");
        Self(cid)
    }

    /// Wraps an existing `Cid`.
    pub fn from_cid(cid: Cid) -> Self {
        Self(cid)
    }

    /// Borrows the inner `Cid`.
    pub fn as_cid(&self) -> &Cid {
        &self.0
    }

    /// Unwraps the inner `Cid`.
    pub fn into_cid(self) -> Cid {
        self.0
    }

    /// The multicodec value stored in this CID.
    pub fn codec(&self) -> u64 {
        self.0.codec()
    }

    /// Registered name of the codec, if known.
    pub fn codec_name(&self) -> Option<&'static str> {
        codec_name(self.codec())
    }

    /// Digest algorithm declared by the multihash, if supported.
    pub fn hash_algorithm(&self) -> Option<HashAlgorithm> {
        HashAlgorithm::from_code(self.0.hash().code())
    }

    /// Re-hashes `bytes` and checks them against this CID's digest.
    pub fn verify(&self, bytes: &[u8]) -> bool {
        let Some(algorithm) = self.hash_algorithm() else {
            return false;
        };
        self.codec() == CODEC && self.0.hash().digest() == algorithm.digest(bytes).as_slice()
    }

    /// The hex-encoded digest (without the multihash prefix).
    pub fn digest_hex(&self) -> String {
        hex::encode(self.0.hash().digest())
    }

    /// Serializes to the standard CID binary form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    /// Parses CID binary bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CidError> {
        let cid = Cid::try_from(bytes).map_err(|e| CidError::Parse(e.to_string()))?;
        Self::checked(cid)
    }

    fn checked(cid: Cid) -> Result<Self, CidError> {
        let code = cid.hash().code();
        if HashAlgorithm::from_code(code).is_none() {
            return Err(CidError::UnsupportedHash { code });
        }
        Ok(Self(cid))
    }
}

/// Computes the CID of encoded transaction bytes.
pub fn compute_cid(bytes: &[u8]) -> TxCid {
    TxCid::new(bytes)
}

/// Computes the CID of encoded transaction bytes with a chosen digest.
pub fn compute_cid_with(bytes: &[u8], algorithm: HashAlgorithm) -> TxCid {
    TxCid::with_hash(bytes, algorithm)
}

impl fmt::Display for TxCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .0
            .to_string_of_base(Base::Base58Btc)
            .map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl fmt::Debug for TxCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxCid({})", self)
    }
}

impl FromStr for TxCid {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cid = Cid::try_from(s).map_err(|e| CidError::Parse(e.to_string()))?;
        Self::checked(cid)
    }
}

impl From<TxCid> for Cid {
    fn from(value: TxCid) -> Self {
        value.0
    }
}
