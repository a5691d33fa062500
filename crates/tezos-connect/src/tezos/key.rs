use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{decode_prefixed, encode_prefixed, Error};

/// Public key curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// ed25519 (`edpk`)
    Ed25519,
    /// secp256k1 (`sppk`)
    Secp256k1,
    /// P-256 (`p2pk`)
    P256,
}

impl KeyKind {
    fn prefix(&self) -> &'static [u8] {
        match self {
            KeyKind::Ed25519 => &[13, 15, 37, 217],
            KeyKind::Secp256k1 => &[3, 254, 226, 86],
            KeyKind::P256 => &[3, 178, 139, 127],
        }
    }

    fn key_len(&self) -> usize {
        match self {
            KeyKind::Ed25519 => 32,
            KeyKind::Secp256k1 | KeyKind::P256 => 33,
        }
    }

    fn tag(&self) -> u8 {
        match self {
            KeyKind::Ed25519 => 0,
            KeyKind::Secp256k1 => 1,
            KeyKind::P256 => 2,
        }
    }
}

/// Account public key, as published by a reveal
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    kind: KeyKind,
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Key curve
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Append the tagged binary encoding
    pub fn write(&self, out: &mut Vec<u8>) {
        out.push(self.kind.tag());
        out.extend_from_slice(&self.bytes);
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_prefixed(self.kind.prefix(), &self.bytes))
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.get(..4) {
            Some("edpk") => KeyKind::Ed25519,
            Some("sppk") => KeyKind::Secp256k1,
            Some("p2pk") => KeyKind::P256,
            Some("BLpk") => {
                return Err(Error::Unsupported(
                    "BLS12-381 keys cannot be revealed without a proof".to_string(),
                ))
            }
            _ => return Err(Error::UnknownPrefix(s.to_string())),
        };

        let bytes = decode_prefixed(s, kind.prefix(), kind.key_len())?;
        Ok(Self { kind, bytes })
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
