//! The guest intermediate representation: expressions and instructions.

pub mod expr;
pub mod instr;

pub use expr::{BinOpKind, Expr, InputSource};
pub use instr::Instr;
