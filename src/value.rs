//! Concrete result of expression evaluation: a word plus a taint flag.

use crate::word::Word;

use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A concrete word paired with a taint flag.
pub struct Value {
    word: Word,
    tainted: bool,
}

impl Value {
    /// The default, untainted zero value memory cells and fresh variables start as.
    pub const ZERO: Value = Value {
        word: Word::ZERO,
        tainted: false,
    };

    /// Build a value from a word and an explicit taint flag.
    pub const fn new(word: Word, tainted: bool) -> Self {
        Self { word, tainted }
    }

    /// Build an untainted value.
    pub const fn untainted(word: Word) -> Self {
        Self::new(word, false)
    }

    /// Build a tainted value.
    pub const fn tainted(word: Word) -> Self {
        Self::new(word, true)
    }

    /// The underlying word.
    pub const fn word(&self) -> Word {
        self.word
    }

    /// `true` if this value carries attacker-influenced data.
    pub const fn is_tainted(&self) -> bool {
        self.tainted
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)
    }
}
