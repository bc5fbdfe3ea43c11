//! The fetch-execute loop, shared by the concrete and concolic interpreters.
//!
//! Both interpreters implement [`Interpret`]: one trait with default-
//! implemented rule methods (`Assign`/`Store`/`Goto`/expression evaluation)
//! and two required hook points — `eval_input` and `select_if_branch` — that
//! are the only places the two interpreters differ. This avoids a deep
//! inheritance hierarchy in favor of two small structs behind one interface.

pub mod concolic;
pub mod concrete;

pub use concolic::ConcolicInterpreter;
pub use concrete::ConcreteInterpreter;

use crate::context::Context;
use crate::error::ExecutionError;
use crate::ir::expr::InputSource;
use crate::ir::{BinOpKind, Expr, Instr};
use crate::policy::{TaintCheckHandler, TaintPolicy};
use crate::runtime_value::RuntimeValue;

use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The interpreter's run state, threaded explicitly through `run` rather
/// than implied by control flow, so a caller can always name which state a
/// run ended in.
pub enum RunState {
    /// Constructed but not yet started.
    Ready,
    /// Executing instructions.
    Running,
    /// Halted normally: PC ran past the last instruction.
    Halted,
    /// Aborted on a fatal [`ExecutionError`].
    Fault,
}

/// Shared interpreter mechanism. `P` and `H` are the taint policy and
/// attack handler plugged in at construction.
pub trait Interpret<P: TaintPolicy, H: TaintCheckHandler> {
    /// The taint policy this run consults.
    fn policy(&self) -> &P;

    /// The attack handler this run consults.
    fn handler(&mut self) -> &mut H;

    /// Whether to print each fetched instruction to stdout before execution.
    fn print_statements(&self) -> bool;

    /// Evaluate a `GetInput` node. The concrete interpreter pops from
    /// `source`; the concolic interpreter draws a fresh symbolic input and
    /// ignores `source` entirely.
    fn eval_input(&mut self, source: &Rc<InputSource>, name: &str) -> Result<RuntimeValue, ExecutionError>;

    /// Decide which branch a statement-position `If` takes, given the
    /// evaluated condition. The concrete interpreter requires `cond` to be
    /// `0`/`1` and follows it; the concolic interpreter always takes the
    /// then-branch and conjoins `cond`'s symbolic projection into the
    /// running path condition.
    fn select_if_branch(&mut self, cond: RuntimeValue) -> Result<bool, ExecutionError>;

    /// Evaluate an expression to a [`RuntimeValue`].
    fn eval(&mut self, expr: &Expr, ctx: &mut Context) -> Result<RuntimeValue, ExecutionError> {
        match expr {
            Expr::Value(word, tainted) => Ok(RuntimeValue::Concrete(crate::value::Value::new(*word, *tainted))),
            Expr::Var(name) => ctx.resolve(name),
            Expr::GetInput(source, name) => self.eval_input(source, name),
            Expr::Load(addr) => {
                let addr = self.eval(addr, ctx)?.as_concrete()?;
                Ok(RuntimeValue::Concrete(ctx.memory_mut().get(addr.word())?))
            }
            Expr::BinOp(kind, left, right) => {
                let left = self.eval(left, ctx)?;
                let right = self.eval(right, ctx)?;
                Ok(Self::eval_binop(*kind, left, right))
            }
            Expr::If(cond, then_branch, else_branch) => {
                let cond = self.eval(cond, ctx)?.as_concrete()?;
                match cond.word().value() {
                    1 => self.eval(then_branch, ctx),
                    0 => self.eval(else_branch, ctx),
                    _ => Err(ExecutionError::InvalidIfCondition { value: cond.word() }),
                }
            }
        }
    }

    /// Apply a binary operation, taking the concrete path when both
    /// operands are concrete and building a structural symbolic node
    /// otherwise (operand order preserved, no taint bit).
    fn eval_binop(kind: BinOpKind, left: RuntimeValue, right: RuntimeValue) -> RuntimeValue {
        match (&left, &right) {
            (RuntimeValue::Concrete(l), RuntimeValue::Concrete(r)) => RuntimeValue::Concrete(crate::value::Value::new(
                kind.apply(l.word(), r.word()),
                l.is_tainted() || r.is_tainted(),
            )),
            _ => RuntimeValue::Symbolic(crate::symbolic::SymExpr::BinOp(
                kind,
                Box::new(left.to_sym_expr()),
                Box::new(right.to_sym_expr()),
            )),
        }
    }

    /// Execute one instruction, mutating `ctx`. The instruction itself is
    /// responsible for advancing the PC.
    fn exec(&mut self, instr: &Instr, ctx: &mut Context) -> Result<(), ExecutionError> {
        match instr {
            Instr::Assign(name, expr) => {
                let value = self.eval(expr, ctx)?;
                ctx.assign(name.clone(), value);
                ctx.set_pc(ctx.pc().wrapping_add(crate::word::Word::ONE));
            }
            Instr::Store(addr, expr) => {
                let addr = self.eval(addr, ctx)?.as_concrete()?;
                let value = self.eval(expr, ctx)?.as_concrete()?;
                let addr_tainted = self.policy().tainted_address(addr, value);
                ctx.memory_mut().set(addr.word(), value)?;
                ctx.memory_mut().set_taint(addr.word(), addr_tainted)?;
                ctx.set_pc(ctx.pc().wrapping_add(crate::word::Word::ONE));
            }
            Instr::Goto(target) => {
                let target = self.eval(target, ctx)?;
                if !self.policy().goto_check(&target) {
                    self.handler().handle_goto(ctx.pc(), instr)?;
                }
                let target = target.as_concrete()?;
                ctx.set_pc(target.word());
            }
            Instr::If(cond, then_pc, else_pc) => {
                let cond = self.eval(cond, ctx)?;
                let take_then = self.select_if_branch(cond)?;
                let target_expr = if take_then { then_pc } else { else_pc };
                let target = self.eval(target_expr, ctx)?.as_concrete()?;
                ctx.set_pc(target.word());
            }
        }
        Ok(())
    }

    /// Run to completion: fetch, dispatch, repeat until the context halts
    /// or a fatal error aborts the run.
    fn run(&mut self, mut ctx: Context) -> Result<Context, ExecutionError> {
        let mut state = RunState::Ready;
        loop {
            let Some(instr) = ctx.current_instr() else {
                state = RunState::Halted;
                break;
            };
            state = RunState::Running;
            if self.print_statements() {
                println!("{} : {}", ctx.pc(), instr);
            }
            tracing::debug!(pc = %ctx.pc(), kind = instr.kind(), "dispatching instruction");
            if let Err(err) = self.exec(&instr, &mut ctx) {
                state = RunState::Fault;
                tracing::warn!(pc = %ctx.pc(), error = %err, "interpreter fault");
                return Err(err);
            }
        }
        debug_assert_eq!(state, RunState::Halted);
        Ok(ctx)
    }
}
