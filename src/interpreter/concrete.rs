//! The concrete interpreter: fetch-execute with taint propagation over
//! concrete words and a concrete input queue.

use crate::error::ExecutionError;
use crate::ir::expr::InputSource;
use crate::policy::{DefaultTaintCheckHandler, DefaultTaintPolicy, TaintCheckHandler, TaintPolicy};
use crate::runtime_value::RuntimeValue;
use crate::value::Value;

use super::Interpret;

use std::rc::Rc;

/// Interprets a program entirely in the concrete world: `GetInput` consumes
/// its source queue, and a statement-position `If` follows the condition's
/// concrete `0`/`1` value.
#[derive(Debug)]
pub struct ConcreteInterpreter<P = DefaultTaintPolicy, H = DefaultTaintCheckHandler> {
    policy: P,
    handler: H,
    print_statements: bool,
}

impl ConcreteInterpreter<DefaultTaintPolicy, DefaultTaintCheckHandler> {
    /// Build an interpreter with the default policy and handler.
    pub fn with_defaults() -> Self {
        Self::new(DefaultTaintPolicy, DefaultTaintCheckHandler, false)
    }
}

impl<P: TaintPolicy, H: TaintCheckHandler> ConcreteInterpreter<P, H> {
    /// Build an interpreter from explicit policy and handler collaborators.
    pub fn new(policy: P, handler: H, print_statements: bool) -> Self {
        Self {
            policy,
            handler,
            print_statements,
        }
    }
}

impl<P: TaintPolicy, H: TaintCheckHandler> Interpret<P, H> for ConcreteInterpreter<P, H> {
    fn policy(&self) -> &P {
        &self.policy
    }

    fn handler(&mut self) -> &mut H {
        &mut self.handler
    }

    fn print_statements(&self) -> bool {
        self.print_statements
    }

    fn eval_input(&mut self, source: &Rc<InputSource>, name: &str) -> Result<RuntimeValue, ExecutionError> {
        let word = source.pop_front().ok_or_else(|| ExecutionError::InputExhausted {
            name: name.to_string(),
        })?;
        let tainted = self.policy.input_policy(name);
        Ok(RuntimeValue::Concrete(Value::new(word, tainted)))
    }

    fn select_if_branch(&mut self, cond: RuntimeValue) -> Result<bool, ExecutionError> {
        let cond = cond.as_concrete()?;
        match cond.word().value() {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(ExecutionError::InvalidIfCondition { value: cond.word() }),
        }
    }
}
