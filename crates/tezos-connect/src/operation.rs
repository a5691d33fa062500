//! Unsigned operation assembly and binary encoding

use thiserror::Error;

use crate::encoding::{self, write_big_nat, write_dynamic, write_nat};
use crate::micheline::{self, Parameters};
use crate::params::NetworkParams;
use crate::tezos::{self, Address, BlockHash, PublicKey};
use crate::types::BigInt;

const TAG_FAILING_NOOP: u8 = 17;
const TAG_REVEAL: u8 = 107;
const TAG_TRANSACTION: u8 = 108;

/// Fixed point iterations when sizing a fee that depends on its own encoding
const MAX_FEE_ROUNDS: usize = 8;

/// Operation encoding error
#[derive(Debug, Error)]
pub enum Error {
    /// Address or key cannot be encoded
    #[error(transparent)]
    Tezos(#[from] tezos::Error),
    /// Call parameters cannot be encoded
    #[error(transparent)]
    Micheline(#[from] micheline::Error),
    /// Field overflow
    #[error(transparent)]
    Encoding(#[from] encoding::Error),
    /// Manager contents need counters past `u64::MAX`
    #[error("no counter left after {0}")]
    CounterOverflow(u64),
}

/// Fee and resource limits of a manager operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Fee in mutez
    pub fee: u64,
    /// Gas limit
    pub gas_limit: u64,
    /// Storage limit in bytes
    pub storage_limit: u64,
}

/// Publishes the public key of the source account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// Source account
    pub source: Address,
    /// Account counter
    pub counter: u64,
    /// Fee and limits
    pub limits: Limits,
    /// Revealed key
    pub public_key: PublicKey,
}

/// Transfer and optional smart contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Source account
    pub source: Address,
    /// Account counter
    pub counter: u64,
    /// Fee and limits
    pub limits: Limits,
    /// Amount in mutez
    pub amount: BigInt,
    /// Destination account or contract
    pub destination: Address,
    /// Call parameters
    pub parameters: Parameters,
}

/// Operation that always fails, used to sign arbitrary messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailingNoop {
    /// Signed message
    pub message: Vec<u8>,
}

/// One entry of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationContent {
    /// Reveal
    Reveal(Reveal),
    /// Transaction
    Transaction(Transaction),
    /// Failing noop
    FailingNoop(FailingNoop),
}

impl OperationContent {
    /// Counter of a manager operation, `None` for kinds without one
    pub fn counter(&self) -> Option<u64> {
        match self {
            OperationContent::Reveal(reveal) => Some(reveal.counter),
            OperationContent::Transaction(tx) => Some(tx.counter),
            OperationContent::FailingNoop(_) => None,
        }
    }

    fn counter_mut(&mut self) -> Option<&mut u64> {
        match self {
            OperationContent::Reveal(reveal) => Some(&mut reveal.counter),
            OperationContent::Transaction(tx) => Some(&mut tx.counter),
            OperationContent::FailingNoop(_) => None,
        }
    }

    /// Kind name as used by the node RPC
    pub fn kind(&self) -> &'static str {
        match self {
            OperationContent::Reveal(_) => "reveal",
            OperationContent::Transaction(_) => "transaction",
            OperationContent::FailingNoop(_) => "failing_noop",
        }
    }

    /// Append the binary form
    pub fn write(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            OperationContent::Reveal(reveal) => {
                out.push(TAG_REVEAL);
                write_manager(out, &reveal.source, reveal.counter, &reveal.limits)?;
                reveal.public_key.write(out);
            }
            OperationContent::Transaction(tx) => {
                out.push(TAG_TRANSACTION);
                write_manager(out, &tx.source, tx.counter, &tx.limits)?;
                write_big_nat(out, &tx.amount)?;
                tx.destination.write_contract_id(out);
                tx.parameters.write(out)?;
            }
            OperationContent::FailingNoop(noop) => {
                out.push(TAG_FAILING_NOOP);
                write_dynamic(out, &noop.message)?;
            }
        }
        Ok(())
    }
}

fn write_manager(
    out: &mut Vec<u8>,
    source: &Address,
    counter: u64,
    limits: &Limits,
) -> Result<(), Error> {
    source.write_key_hash(out)?;
    write_nat(out, limits.fee);
    write_nat(out, counter);
    write_nat(out, limits.gas_limit);
    write_nat(out, limits.storage_limit);
    Ok(())
}

/// Operation under construction
///
/// Contents keep their insertion order, which is also the order counters are
/// handed out in.
#[derive(Debug, Clone)]
pub struct Operation {
    branch: BlockHash,
    contents: Vec<OperationContent>,
    params: &'static NetworkParams,
}

impl Operation {
    /// Empty operation on the empty branch
    pub fn new(params: &'static NetworkParams) -> Self {
        Self {
            branch: BlockHash::default(),
            contents: Vec::new(),
            params,
        }
    }

    /// Anchor the operation on `branch`
    pub fn with_branch(&mut self, branch: BlockHash) -> &mut Self {
        self.branch = branch;
        self
    }

    /// Append a content entry
    pub fn with_contents(&mut self, content: OperationContent) -> &mut Self {
        self.contents.push(content);
        self
    }

    /// Insert a content entry before all others
    pub fn with_contents_front(&mut self, content: OperationContent) -> &mut Self {
        self.contents.insert(0, content);
        self
    }

    /// Content entries in order
    pub fn contents(&self) -> &[OperationContent] {
        &self.contents
    }

    /// Give consecutive counters to manager contents, starting at `first`
    ///
    /// Contents without a counter are skipped and do not consume a value.
    /// Returns the last counter assigned, `None` when no content takes one.
    pub fn assign_counters(&mut self, first: u64) -> Result<Option<u64>, Error> {
        let mut next = Some(first);
        let mut last = None;
        for content in self.contents.iter_mut() {
            if let Some(counter) = content.counter_mut() {
                let value = next.ok_or(Error::CounterOverflow(u64::MAX))?;
                *counter = value;
                last = Some(value);
                next = value.checked_add(1);
            }
        }
        Ok(last)
    }

    /// Set the fee of every transaction carrying a gas limit
    ///
    /// The fee is the minimal fee of the network fee policy for the
    /// transaction's gas limit and encoded size. Since the fee is part of the
    /// encoding it is recomputed until it no longer changes.
    pub fn apply_transaction_fees(&mut self) -> Result<(), Error> {
        let params = self.params;
        for content in self.contents.iter_mut() {
            let OperationContent::Transaction(tx) = content else {
                continue;
            };
            if tx.limits.gas_limit == 0 {
                continue;
            }

            for _ in 0..MAX_FEE_ROUNDS {
                let mut encoded = Vec::new();
                OperationContent::Transaction(tx.clone()).write(&mut encoded)?;
                let fee = params.min_fee(tx.limits.gas_limit, encoded.len() as u64);
                if fee == tx.limits.fee {
                    break;
                }
                tx.limits.fee = fee;
            }
        }
        Ok(())
    }

    /// Unsigned binary form: branch followed by every content entry
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(128);
        out.extend_from_slice(self.branch.as_bytes());
        for content in &self.contents {
            content.write(&mut out)?;
        }
        Ok(out)
    }
}
