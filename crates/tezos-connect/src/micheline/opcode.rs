//! Michelson primitive opcodes

use std::fmt;

/// Primitive names indexed by their binary opcode
const PRIMITIVES: [&str; 157] = [
    "parameter", "storage", "code", "False", "Elt", "Left", "None", "Pair", "Right", "Some",
    "True", "Unit", "PACK", "UNPACK", "BLAKE2B", "SHA256", "SHA512", "ABS", "ADD", "AMOUNT",
    "AND", "BALANCE", "CAR", "CDR", "CHECK_SIGNATURE", "COMPARE", "CONCAT", "CONS",
    "CREATE_ACCOUNT", "CREATE_CONTRACT", "IMPLICIT_ACCOUNT", "DIP", "DROP", "DUP", "EDIV",
    "EMPTY_MAP", "EMPTY_SET", "EQ", "EXEC", "FAILWITH", "GE", "GET", "GT", "HASH_KEY", "IF",
    "IF_CONS", "IF_LEFT", "IF_NONE", "INT", "LAMBDA", "LE", "LEFT", "LOOP", "LSL", "LSR", "LT",
    "MAP", "MEM", "MUL", "NEG", "NEQ", "NIL", "NONE", "NOT", "NOW", "OR", "PAIR", "PUSH",
    "RIGHT", "SIZE", "SOME", "SOURCE", "SENDER", "SELF", "STEPS_TO_QUOTA", "SUB", "SWAP",
    "TRANSFER_TOKENS", "SET_DELEGATE", "UNIT", "UPDATE", "XOR", "ITER", "LOOP_LEFT", "ADDRESS",
    "CONTRACT", "ISNAT", "CAST", "RENAME", "bool", "contract", "int", "key", "key_hash",
    "lambda", "list", "map", "big_map", "nat", "option", "or", "pair", "set", "signature",
    "string", "bytes", "mutez", "timestamp", "unit", "operation", "address", "SLICE", "DIG",
    "DUG", "EMPTY_BIG_MAP", "APPLY", "chain_id", "CHAIN_ID", "LEVEL", "SELF_ADDRESS", "never",
    "NEVER", "UNPAIR", "VOTING_POWER", "TOTAL_VOTING_POWER", "KECCAK", "SHA3", "PAIRING_CHECK",
    "bls12_381_g1", "bls12_381_g2", "bls12_381_fr", "sapling_state",
    "sapling_transaction_deprecated", "SAPLING_EMPTY_STATE", "SAPLING_VERIFY_UPDATE", "ticket",
    "TICKET_DEPRECATED", "READ_TICKET", "SPLIT_TICKET", "JOIN_TICKETS", "GET_AND_UPDATE",
    "chest", "chest_key", "OPEN_CHEST", "VIEW", "view", "constant", "SUB_MUTEZ",
    "tx_rollup_l2_address", "MIN_BLOCK_TIME", "sapling_transaction", "EMIT", "Lambda_rec",
    "LAMBDA_REC", "TICKET", "BYTES", "NAT",
];

/// Michelson primitive
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpCode(u8);

impl OpCode {
    /// `Pair`
    pub const PAIR: OpCode = OpCode(7);
    /// `Unit`
    pub const UNIT: OpCode = OpCode(11);

    /// Look up a primitive by its case sensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .position(|p| *p == name)
            .map(|index| OpCode(index as u8))
    }

    /// Primitive name
    pub fn name(&self) -> &'static str {
        PRIMITIVES[self.0 as usize]
    }

    /// Binary opcode
    pub fn code(&self) -> u8 {
        self.0
    }
}

impl fmt::Debug for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_codes() {
        assert_eq!(OpCode::from_name("Pair"), Some(OpCode::PAIR));
        assert_eq!(OpCode::from_name("Unit"), Some(OpCode::UNIT));
        assert_eq!(OpCode::from_name("parameter").map(|op| op.code()), Some(0));
        assert_eq!(OpCode::from_name("Left").map(|op| op.code()), Some(5));
        assert_eq!(OpCode::from_name("address").map(|op| op.code()), Some(110));
        assert_eq!(OpCode::from_name("NAT").map(|op| op.code()), Some(156));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(OpCode::from_name("pair").is_some());
        assert_ne!(OpCode::from_name("pair"), OpCode::from_name("Pair"));
        assert_eq!(OpCode::from_name("PaIr"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for name in PRIMITIVES {
            let op = OpCode::from_name(name).expect("known primitive");
            assert_eq!(op.name(), name);
        }
    }
}
