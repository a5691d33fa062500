use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{decode_prefixed, encode_prefixed, Error};

/// Address hash length
const HASH_LEN: usize = 20;

/// Address kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Implicit account, ed25519 key (`tz1`)
    Ed25519,
    /// Implicit account, secp256k1 key (`tz2`)
    Secp256k1,
    /// Implicit account, P-256 key (`tz3`)
    P256,
    /// Implicit account, BLS12-381 key (`tz4`)
    Bls12_381,
    /// Originated smart contract (`KT1`)
    Contract,
}

impl AddressKind {
    const ALL: [AddressKind; 5] = [
        AddressKind::Ed25519,
        AddressKind::Secp256k1,
        AddressKind::P256,
        AddressKind::Bls12_381,
        AddressKind::Contract,
    ];

    fn prefix(&self) -> &'static [u8] {
        match self {
            AddressKind::Ed25519 => &[6, 161, 159],
            AddressKind::Secp256k1 => &[6, 161, 161],
            AddressKind::P256 => &[6, 161, 164],
            AddressKind::Bls12_381 => &[6, 161, 166],
            AddressKind::Contract => &[2, 90, 121],
        }
    }

    /// Tag in the binary public key hash encoding, `None` for contracts
    fn implicit_tag(&self) -> Option<u8> {
        match self {
            AddressKind::Ed25519 => Some(0),
            AddressKind::Secp256k1 => Some(1),
            AddressKind::P256 => Some(2),
            AddressKind::Bls12_381 => Some(3),
            AddressKind::Contract => None,
        }
    }
}

/// Validated Tezos address
///
/// Only obtainable by parsing, so holding one means the text it came from was
/// well formed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    kind: AddressKind,
    hash: [u8; HASH_LEN],
}

impl Address {
    /// Address kind
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Address hash
    pub fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    /// Whether this is an implicit (key backed) account
    pub fn is_implicit(&self) -> bool {
        self.kind != AddressKind::Contract
    }

    /// Append the 21 byte public key hash encoding
    ///
    /// Only implicit accounts have one, manager operation sources must be
    /// implicit.
    pub fn write_key_hash(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        let tag = self.kind.implicit_tag().ok_or_else(|| {
            Error::Unsupported(format!("{} is not an implicit account", self))
        })?;
        out.push(tag);
        out.extend_from_slice(&self.hash);
        Ok(())
    }

    /// Append the 22 byte contract id encoding
    pub fn write_contract_id(&self, out: &mut Vec<u8>) {
        match self.kind.implicit_tag() {
            Some(tag) => {
                out.push(0);
                out.push(tag);
                out.extend_from_slice(&self.hash);
            }
            None => {
                out.push(1);
                out.extend_from_slice(&self.hash);
                out.push(0);
            }
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_prefixed(self.kind.prefix(), &self.hash))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = AddressKind::ALL
            .into_iter()
            .find(|kind| match kind {
                AddressKind::Ed25519 => s.starts_with("tz1"),
                AddressKind::Secp256k1 => s.starts_with("tz2"),
                AddressKind::P256 => s.starts_with("tz3"),
                AddressKind::Bls12_381 => s.starts_with("tz4"),
                AddressKind::Contract => s.starts_with("KT1"),
            })
            .ok_or_else(|| Error::UnknownPrefix(s.to_string()))?;

        let payload = decode_prefixed(s, kind.prefix(), HASH_LEN)?;
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&payload);

        Ok(Self { kind, hash })
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb";
    const TZBTC: &str = "KT1PWx2mnDueood7fEmfbBDKx1D9BAnnXitn";

    #[test]
    fn test_parse_implicit() {
        let address = Address::from_str(ALICE).expect("valid tz1");
        assert_eq!(address.kind(), AddressKind::Ed25519);
        assert!(address.is_implicit());
        assert_eq!(address.to_string(), ALICE);
    }

    #[test]
    fn test_parse_contract() {
        let address = Address::from_str(TZBTC).expect("valid KT1");
        assert_eq!(address.kind(), AddressKind::Contract);
        assert!(!address.is_implicit());
        assert_eq!(address.to_string(), TZBTC);
    }

    #[test]
    fn test_every_kind_round_trips() {
        for kind in AddressKind::ALL {
            let text = encode_prefixed(kind.prefix(), &[42u8; HASH_LEN]);
            let address = Address::from_str(&text).expect("valid address");
            assert_eq!(address.kind(), kind);
            assert_eq!(address.hash(), &[42u8; HASH_LEN]);
        }
    }

    #[test]
    fn test_reject_malformed() {
        assert!(matches!(
            Address::from_str("not-an-address"),
            Err(Error::UnknownPrefix(_))
        ));
        assert!(Address::from_str("tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjc").is_err());
        assert!(Address::from_str("tz1").is_err());
        assert!(Address::from_str("").is_err());
    }

    #[test]
    fn test_key_hash_encoding() {
        let address = Address::from_str(ALICE).expect("valid tz1");
        let mut out = Vec::new();
        address.write_key_hash(&mut out).expect("implicit");
        assert_eq!(out.len(), 21);
        assert_eq!(out[0], 0);
        assert_eq!(&out[1..], address.hash());
    }

    #[test]
    fn test_contract_has_no_key_hash() {
        let address = Address::from_str(TZBTC).expect("valid KT1");
        let mut out = Vec::new();
        assert!(matches!(
            address.write_key_hash(&mut out),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn test_contract_id_encoding() {
        let implicit = Address::from_str(ALICE).expect("valid tz1");
        let mut out = Vec::new();
        implicit.write_contract_id(&mut out);
        assert_eq!(out.len(), 22);
        assert_eq!(&out[..2], &[0, 0]);

        let contract = Address::from_str(TZBTC).expect("valid KT1");
        let mut out = Vec::new();
        contract.write_contract_id(&mut out);
        assert_eq!(out.len(), 22);
        assert_eq!(out[0], 1);
        assert_eq!(&out[1..21], contract.hash());
        assert_eq!(out[21], 0);
    }
}
