//! Micheline expressions and smart contract call parameters
//!
//! Call arguments arrive as Micheline JSON and leave as the canonical
//! Micheline binary form embedded in a transaction.

mod binary;
mod json;
mod opcode;

use std::fmt;

use thiserror::Error;

pub use opcode::OpCode;

use crate::types::BigInt;

/// Micheline error
#[derive(Debug, Error)]
pub enum Error {
    /// Text is not JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON does not describe a Micheline expression
    #[error("invalid micheline: {0}")]
    Invalid(String),
    /// Primitive name not in the opcode table
    #[error("unknown primitive `{0}`")]
    UnknownPrimitive(String),
    /// Entrypoint name cannot be encoded
    #[error("invalid entrypoint `{0}`")]
    InvalidEntrypoint(String),
    /// Binary encoding failed
    #[error(transparent)]
    Encoding(#[from] crate::encoding::Error),
}

/// Micheline expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal
    Int(BigInt),
    /// String literal
    String(String),
    /// Bytes literal
    Bytes(Vec<u8>),
    /// Sequence
    Seq(Vec<Expr>),
    /// Primitive application
    Prim {
        /// Primitive
        op: OpCode,
        /// Arguments
        args: Vec<Expr>,
        /// Annotations, including their `%`, `:` or `@` sigil
        annots: Vec<String>,
    },
}

impl Expr {
    /// Primitive application without annotations
    pub fn prim(op: OpCode, args: Vec<Expr>) -> Self {
        Expr::Prim {
            op,
            args,
            annots: Vec::new(),
        }
    }
}

/// Entrypoint targeted by a call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Entrypoint {
    /// `default`
    #[default]
    Default,
    /// `root`
    Root,
    /// `do`
    Do,
    /// `set_delegate`
    SetDelegate,
    /// `remove_delegate`
    RemoveDelegate,
    /// `deposit`
    Deposit,
    /// `stake`
    Stake,
    /// `unstake`
    Unstake,
    /// `finalize_unstake`
    FinalizeUnstake,
    /// `set_delegate_parameters`
    SetDelegateParameters,
    /// Any other entrypoint
    Named(String),
}

/// Longest entrypoint name accepted by the protocol
const MAX_ENTRYPOINT_LEN: usize = 31;

impl Entrypoint {
    /// Entrypoint from its name, the empty name meaning `default`
    pub fn from_name(name: &str) -> Result<Self, Error> {
        let entrypoint = match name {
            "" | "default" => Entrypoint::Default,
            "root" => Entrypoint::Root,
            "do" => Entrypoint::Do,
            "set_delegate" => Entrypoint::SetDelegate,
            "remove_delegate" => Entrypoint::RemoveDelegate,
            "deposit" => Entrypoint::Deposit,
            "stake" => Entrypoint::Stake,
            "unstake" => Entrypoint::Unstake,
            "finalize_unstake" => Entrypoint::FinalizeUnstake,
            "set_delegate_parameters" => Entrypoint::SetDelegateParameters,
            other => {
                if other.len() > MAX_ENTRYPOINT_LEN {
                    return Err(Error::InvalidEntrypoint(other.to_string()));
                }
                Entrypoint::Named(other.to_string())
            }
        };
        Ok(entrypoint)
    }

    /// Entrypoint name
    pub fn name(&self) -> &str {
        match self {
            Entrypoint::Default => "default",
            Entrypoint::Root => "root",
            Entrypoint::Do => "do",
            Entrypoint::SetDelegate => "set_delegate",
            Entrypoint::RemoveDelegate => "remove_delegate",
            Entrypoint::Deposit => "deposit",
            Entrypoint::Stake => "stake",
            Entrypoint::Unstake => "unstake",
            Entrypoint::FinalizeUnstake => "finalize_unstake",
            Entrypoint::SetDelegateParameters => "set_delegate_parameters",
            Entrypoint::Named(name) => name,
        }
    }

    fn tag(&self) -> Option<u8> {
        match self {
            Entrypoint::Default => Some(0),
            Entrypoint::Root => Some(1),
            Entrypoint::Do => Some(2),
            Entrypoint::SetDelegate => Some(3),
            Entrypoint::RemoveDelegate => Some(4),
            Entrypoint::Deposit => Some(5),
            Entrypoint::Stake => Some(6),
            Entrypoint::Unstake => Some(7),
            Entrypoint::FinalizeUnstake => Some(8),
            Entrypoint::SetDelegateParameters => Some(9),
            Entrypoint::Named(_) => None,
        }
    }
}

impl fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Smart contract call parameters
///
/// `value` stays `None` until an argument sets it, and a transaction without
/// a value carries no parameters at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    /// Called entrypoint
    pub entrypoint: Entrypoint,
    /// Argument value
    pub value: Option<Expr>,
}

impl Parameters {
    /// Whether no argument has been set
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}
