//! The symbolic-expression model the concolic interpreter records path
//! conditions in.

use crate::consts::SYMBOL_PREFIX;
use crate::ir::expr::BinOpKind;
use crate::word::Word;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A symbolic expression tree: either a boolean path-condition node or a
/// symbolic projection of an IR expression over fresh named inputs.
pub enum SymExpr {
    /// The boolean constant `true`.
    True,
    /// The boolean constant `false`.
    False,
    /// A fresh named symbolic input, e.g. `s_1`.
    Input(String),
    /// A concrete word lifted into a symbolic tree because it sits next to a
    /// symbolic operand in a binary operation.
    Const(Word),
    /// Boolean conjunction of two path-condition fragments.
    And(Box<SymExpr>, Box<SymExpr>),
    /// An IR arithmetic/comparison node with at least one symbolic leaf.
    BinOp(BinOpKind, Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Conjoin `self` with `other`, short-circuiting on the `True` identity.
    pub fn and(self, other: SymExpr) -> SymExpr {
        match (&self, &other) {
            (SymExpr::True, _) => other,
            (_, SymExpr::True) => self,
            _ => SymExpr::And(Box::new(self), Box::new(other)),
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymExpr::True => write!(f, "True"),
            SymExpr::False => write!(f, "False"),
            SymExpr::Input(name) => write!(f, "{name}"),
            SymExpr::Const(word) => write!(f, "{word}"),
            SymExpr::And(left, right) => write!(f, "{left} AND {right}"),
            SymExpr::BinOp(kind, left, right) => write!(f, "({left}) {kind} ({right})"),
        }
    }
}

/// Monotonic generator of fresh symbolic-input names: `s_1`, `s_2`, ...
#[derive(Debug, Clone, Default)]
pub struct IdProvider {
    last_id: u32,
}

impl IdProvider {
    /// Create a fresh id provider starting at `s_1`.
    pub fn new() -> Self {
        Self { last_id: 0 }
    }

    /// Produce the next fresh symbolic-input name.
    pub fn next_name(&mut self) -> String {
        self.last_id += 1;
        format!("{SYMBOL_PREFIX}_{}", self.last_id)
    }
}
