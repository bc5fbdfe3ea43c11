//! Execution context: program counter, variable environment, memory, and a
//! shared reference to the program being run.

use crate::error::ExecutionError;
use crate::memory::Memory;
use crate::program::Program;
use crate::runtime_value::RuntimeValue;
use crate::word::Word;

use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
/// The mutable state an interpreter threads through a run. Owns its memory
/// and variable map exclusively; holds a shared, read-only reference to the
/// program, since a program may be reused across several contexts.
pub struct Context {
    pc: Word,
    variables: HashMap<String, RuntimeValue>,
    memory: Memory,
    program: Rc<Program>,
}

impl Context {
    /// Build a fresh context. `pc` is typically `Word::ZERO`; variables and
    /// memory are typically empty.
    pub fn new(memory: Memory, variables: HashMap<String, RuntimeValue>, pc: Word, program: Rc<Program>) -> Self {
        Self {
            pc,
            variables,
            memory,
            program,
        }
    }

    /// Build a fresh context at PC 0 with empty variables and memory,
    /// matching the lifecycle the spec calls for embedders to use.
    pub fn fresh(program: Rc<Program>) -> Self {
        Self::new(Memory::default(), HashMap::new(), Word::ZERO, program)
    }

    /// The current program counter.
    pub fn pc(&self) -> Word {
        self.pc
    }

    /// Set the program counter.
    pub fn set_pc(&mut self, pc: Word) {
        self.pc = pc;
    }

    /// The instruction at the current PC, or `None` when the program has
    /// halted (PC past the last instruction).
    pub fn current_instr(&self) -> Option<crate::ir::Instr> {
        self.program.get(self.pc).cloned()
    }

    /// Resolve a variable's current binding. Unknown names are a fatal
    /// `UnboundVariable`.
    pub fn resolve(&self, name: &str) -> Result<RuntimeValue, ExecutionError> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| ExecutionError::UnboundVariable { name: name.to_string() })
    }

    /// Bind `name` to `value`, overwriting any previous binding.
    pub fn assign(&mut self, name: impl Into<String>, value: RuntimeValue) {
        self.variables.insert(name.into(), value);
    }

    /// Shared access to memory.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable access to memory.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// A deep copy of this context: fresh memory and variable map, sharing
    /// only the read-only program reference. Used by speculative search
    /// strategies that need an isolated context to continue from.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Expr, Instr};
    use crate::value::Value;

    fn program() -> Rc<Program> {
        Rc::new(Program::new([Instr::assign("x", Expr::literal(Word::ZERO))]))
    }

    #[test]
    fn resolve_unbound_variable_is_fatal() {
        let ctx = Context::fresh(program());
        assert!(matches!(
            ctx.resolve("x"),
            Err(ExecutionError::UnboundVariable { .. })
        ));
    }

    #[test]
    fn copy_is_independent_of_original() {
        let mut ctx = Context::fresh(program());
        ctx.assign("x", RuntimeValue::Concrete(Value::untainted(Word::new(1))));
        let mut copy = ctx.copy();
        copy.assign("x", RuntimeValue::Concrete(Value::untainted(Word::new(2))));
        assert_eq!(
            ctx.resolve("x").unwrap(),
            RuntimeValue::Concrete(Value::untainted(Word::new(1)))
        );
    }

    #[test]
    fn halted_context_has_no_current_instruction() {
        let mut ctx = Context::fresh(program());
        ctx.set_pc(Word::new(1));
        assert!(ctx.current_instr().is_none());
    }
}
