//! Flat 32-bit address space, divided into fixed-size pages allocated
//! lazily on first access.

use crate::consts::DEFAULT_PAGE_SIZE;
use crate::error::ExecutionError;
use crate::value::Value;
use crate::word::Word;

use std::collections::HashMap;

/// One resident page: a dense array of cells plus a parallel array of
/// address-taint bits (distinct from the data-taint each cell's [`Value`]
/// already carries).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Page {
    cells: Vec<Value>,
    address_taint: Vec<bool>,
}

impl Page {
    fn new(page_size: u32) -> Self {
        Self {
            cells: vec![Value::ZERO; page_size as usize],
            address_taint: vec![false; page_size as usize],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Address-indexed memory. Pages are keyed by page number and created the
/// first time an address inside them is read or written.
pub struct Memory {
    page_size: u32,
    pages: HashMap<u32, Page>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Memory {
    /// Build an empty memory with the given page size, in words.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            pages: HashMap::new(),
        }
    }

    fn split(&self, addr: Word) -> (u32, usize) {
        let addr = addr.value();
        (addr / self.page_size, (addr % self.page_size) as usize)
    }

    fn page_mut(&mut self, page_no: u32) -> &mut Page {
        let page_size = self.page_size;
        self.pages.entry(page_no).or_insert_with(|| Page::new(page_size))
    }

    /// Read the cell at `addr`, allocating its page if this is the first
    /// access. Never-written cells read as `Value(0, untainted)`.
    pub fn get(&mut self, addr: Word) -> Result<Value, ExecutionError> {
        let (page_no, offset) = self.split(addr);
        let page = self.page_mut(page_no);
        page.cells
            .get(offset)
            .copied()
            .ok_or(ExecutionError::AddressOutOfPage { address: addr })
    }

    /// Write `value` to the cell at `addr`, allocating its page if needed.
    pub fn set(&mut self, addr: Word, value: Value) -> Result<(), ExecutionError> {
        let (page_no, offset) = self.split(addr);
        let page = self.page_mut(page_no);
        let cell = page
            .cells
            .get_mut(offset)
            .ok_or(ExecutionError::AddressOutOfPage { address: addr })?;
        *cell = value;
        Ok(())
    }

    /// Read the address-taint bit of the cell at `addr`.
    pub fn get_taint(&mut self, addr: Word) -> Result<bool, ExecutionError> {
        let (page_no, offset) = self.split(addr);
        let page = self.page_mut(page_no);
        page.address_taint
            .get(offset)
            .copied()
            .ok_or(ExecutionError::AddressOutOfPage { address: addr })
    }

    /// Set the address-taint bit of the cell at `addr`.
    pub fn set_taint(&mut self, addr: Word, bit: bool) -> Result<(), ExecutionError> {
        let (page_no, offset) = self.split(addr);
        let page = self.page_mut(page_no);
        let slot = page
            .address_taint
            .get_mut(offset)
            .ok_or(ExecutionError::AddressOutOfPage { address: addr })?;
        *slot = bit;
        Ok(())
    }

    /// The number of resident (ever-touched) pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
