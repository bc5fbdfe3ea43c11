//! The concolic interpreter: evaluates inputs symbolically and accumulates a
//! path-condition expression over the branches actually taken.

use crate::error::ExecutionError;
use crate::ir::expr::InputSource;
use crate::policy::{DefaultTaintCheckHandler, DefaultTaintPolicy, TaintCheckHandler, TaintPolicy};
use crate::runtime_value::RuntimeValue;
use crate::symbolic::{IdProvider, SymExpr};

use super::Interpret;

use std::rc::Rc;

/// Interprets a program concolically: `GetInput` draws a fresh symbolic
/// input instead of consuming `source`, and a statement-position `If`
/// always takes the then-branch, conjoining the condition into the running
/// path condition rather than ever evaluating the else-branch.
#[derive(Debug)]
pub struct ConcolicInterpreter<P = DefaultTaintPolicy, H = DefaultTaintCheckHandler> {
    policy: P,
    handler: H,
    print_statements: bool,
    ids: IdProvider,
    constraints: SymExpr,
}

impl ConcolicInterpreter<DefaultTaintPolicy, DefaultTaintCheckHandler> {
    /// Build an interpreter with the default policy and handler and a fresh
    /// [`IdProvider`].
    pub fn with_defaults() -> Self {
        Self::new(DefaultTaintPolicy, DefaultTaintCheckHandler, IdProvider::new(), false)
    }
}

impl<P: TaintPolicy, H: TaintCheckHandler> ConcolicInterpreter<P, H> {
    /// Build an interpreter from explicit policy, handler, and id provider.
    pub fn new(policy: P, handler: H, ids: IdProvider, print_statements: bool) -> Self {
        Self {
            policy,
            handler,
            print_statements,
            ids,
            constraints: SymExpr::True,
        }
    }

    /// The accumulated path condition for the run so far. Meaningful once
    /// `run` has returned.
    pub fn constraints(&self) -> &SymExpr {
        &self.constraints
    }
}

impl<P: TaintPolicy, H: TaintCheckHandler> Interpret<P, H> for ConcolicInterpreter<P, H> {
    fn policy(&self) -> &P {
        &self.policy
    }

    fn handler(&mut self) -> &mut H {
        &mut self.handler
    }

    fn print_statements(&self) -> bool {
        self.print_statements
    }

    fn eval_input(&mut self, _source: &Rc<InputSource>, _name: &str) -> Result<RuntimeValue, ExecutionError> {
        Ok(RuntimeValue::Symbolic(SymExpr::Input(self.ids.next_name())))
    }

    fn select_if_branch(&mut self, cond: RuntimeValue) -> Result<bool, ExecutionError> {
        let conjunct = cond.to_sym_expr();
        let constraints = std::mem::replace(&mut self.constraints, SymExpr::True);
        self.constraints = constraints.and(conjunct);
        Ok(true)
    }
}
