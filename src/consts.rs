//! Crate-wide constants

/// Word stride the IR requires memory operands to be aligned to.
pub const WORD_ALIGNMENT: u32 = 32;

/// Default number of words per memory page, used when [`crate::memory::Memory`]
/// is constructed without an explicit page size.
pub const DEFAULT_PAGE_SIZE: u32 = 4096;

/// Prefix used by the concolic [`crate::symbolic::IdProvider`] to name fresh
/// symbolic inputs (`s_1`, `s_2`, ...).
pub const SYMBOL_PREFIX: &str = "s";
