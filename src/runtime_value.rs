//! The evaluator's result type: either a concrete [`Value`] or a symbolic
//! expression tree, depending on which world a given evaluation landed in.

use crate::error::ExecutionError;
use crate::symbolic::SymExpr;
use crate::value::Value;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// Either world an expression evaluation can produce. The concrete
/// interpreter only ever produces [`RuntimeValue::Concrete`]; the concolic
/// interpreter produces [`RuntimeValue::Symbolic`] wherever a `GetInput`
/// feeds into the result.
pub enum RuntimeValue {
    /// A concrete word plus taint flag.
    Concrete(Value),
    /// A symbolic expression tree.
    Symbolic(SymExpr),
}

impl RuntimeValue {
    /// Require a concrete value, e.g. for an address, a jump target, or a
    /// value being written to memory. Fails with [`ExecutionError::NotImplemented`]
    /// when `self` is symbolic — there is no symbolic memory model.
    pub fn as_concrete(&self) -> Result<Value, ExecutionError> {
        match self {
            RuntimeValue::Concrete(value) => Ok(*value),
            RuntimeValue::Symbolic(expr) => Err(ExecutionError::NotImplemented {
                reason: format!("symbolic value `{expr}` used where a concrete value is required"),
            }),
        }
    }

    /// Project `self` into the symbolic-expression world, lifting a concrete
    /// word into a [`SymExpr::Const`] when necessary.
    pub fn to_sym_expr(&self) -> SymExpr {
        match self {
            RuntimeValue::Concrete(value) => SymExpr::Const(value.word()),
            RuntimeValue::Symbolic(expr) => expr.clone(),
        }
    }
}

impl From<Value> for RuntimeValue {
    fn from(value: Value) -> Self {
        RuntimeValue::Concrete(value)
    }
}

impl From<SymExpr> for RuntimeValue {
    fn from(expr: SymExpr) -> Self {
        RuntimeValue::Symbolic(expr)
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Concrete(value) => write!(f, "{value}"),
            RuntimeValue::Symbolic(expr) => write!(f, "{expr}"),
        }
    }
}
