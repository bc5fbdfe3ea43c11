//! Execution error taxonomy.

use crate::word::Word;

use thiserror::Error;

/// Fatal conditions the interpreter can raise. Every variant aborts `run` and
/// propagates to the caller; there is no internal retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// `Store`/`Load` constructed with a non-32-aligned literal address.
    #[error("address {address} is not 32-word aligned")]
    Alignment {
        /// The offending address.
        address: Word,
    },

    /// Internal page-index inconsistency. Not reachable through the public
    /// API — the page/offset arithmetic in [`crate::memory::Memory`]
    /// guarantees the offset always falls within the page — but retained in
    /// the taxonomy as a defensive check around that arithmetic.
    #[error("address {address} resolved to an offset outside its page")]
    AddressOutOfPage {
        /// The address whose page lookup misbehaved.
        address: Word,
    },

    /// `Var(x)` read before any `Assign(x, _)` executed.
    #[error("unbound variable `{name}`")]
    UnboundVariable {
        /// The variable that was never assigned.
        name: String,
    },

    /// An instruction variant has no dispatch rule. Structurally impossible
    /// in this implementation — `Instr` is a closed enum and the fetch loop
    /// matches it exhaustively, so an unhandled variant is a compile error
    /// rather than a runtime condition. Retained in the taxonomy for parity
    /// with the design.
    #[error("no execution rule for instruction `{kind}`")]
    NoRuleFor {
        /// Name of the instruction variant.
        kind: &'static str,
    },

    /// An expression variant has no evaluator, or a symbolic runtime value
    /// appeared where a concrete one is structurally required (the
    /// no-symbolic-memory-model Non-goal).
    #[error("not implemented: {reason}")]
    NotImplemented {
        /// What could not be evaluated.
        reason: String,
    },

    /// `If` condition evaluated to a word other than 0 or 1.
    #[error("invalid if condition: expected 0 or 1, got {value}")]
    InvalidIfCondition {
        /// The offending condition value.
        value: Word,
    },

    /// `GetInput` drew from an exhausted input source.
    #[error("input source `{name}` is exhausted")]
    InputExhausted {
        /// The name of the exhausted input.
        name: String,
    },

    /// The default taint-check handler fired on a tainted `Goto` target.
    /// This is the intended outcome of a successful security analysis, not a
    /// bug — it is the only variant callers are expected to catch routinely.
    #[error("probable attack detected: `{instruction}` at pc {pc}")]
    Attack {
        /// Program counter of the offending instruction.
        pc: Word,
        /// Pretty-printed form of the offending instruction.
        instruction: String,
    },
}
