//! Pluggable taint policy and attack-handler interfaces.
//!
//! Both traits carry small, pure decision methods and are passed as generic
//! parameters at interpreter construction — there is no trait object and no
//! global state. `Default*` zero-sized implementations provide the behavior
//! this specification calls the "default policy".

use crate::error::ExecutionError;
use crate::ir::Instr;
use crate::runtime_value::RuntimeValue;
use crate::value::Value;
use crate::word::Word;

/// Decides which inputs are tainted, whether a branch target or a store
/// address counts as an attack surface.
pub trait TaintPolicy {
    /// Whether the named input is tainted. Default: every input is tainted.
    fn input_policy(&self, _input_name: &str) -> bool {
        true
    }

    /// Whether a `Goto`/`If` target passes the taint check. Default: a
    /// tainted concrete target fails; a symbolic target always fails, since
    /// by construction it carries attacker- or quantifier-controlled data.
    fn goto_check(&self, value: &RuntimeValue) -> bool {
        match value {
            RuntimeValue::Concrete(value) => !value.is_tainted(),
            RuntimeValue::Symbolic(_) => false,
        }
    }

    /// Whether the address taint bit of a just-written cell should be set.
    /// Default: reflects only whether the address itself was tainted
    /// (an attacker-controlled pointer), not the value stored through it.
    fn tainted_address(&self, addr: Value, _stored: Value) -> bool {
        addr.is_tainted()
    }
}

/// The effect-producing counterpart of [`TaintPolicy`]: invoked when a
/// taint check fails.
pub trait TaintCheckHandler {
    /// Called when `policy.goto_check` fails for the target of `instr` at
    /// `pc`. Default: raise [`ExecutionError::Attack`].
    fn handle_goto(&mut self, pc: Word, instr: &Instr) -> Result<(), ExecutionError> {
        Err(ExecutionError::Attack {
            pc,
            instruction: instr.to_string(),
        })
    }
}

/// Every input is tainted; any tainted branch target is an attack.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTaintPolicy;

impl TaintPolicy for DefaultTaintPolicy {}

/// Raises [`ExecutionError::Attack`] on the first tainted `Goto`/`If` target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTaintCheckHandler;

impl TaintCheckHandler for DefaultTaintCheckHandler {}
