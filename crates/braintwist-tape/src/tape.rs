use crate::error::{Result, VmError};

/// Fixed-size, zero-initialised cell memory addressed by a signed pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Box<[u8]>,
}

impl Tape {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0u8; size].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, pointer: i64) -> Result<u8> {
        let index = self.index(pointer)?;
        Ok(self.cells[index])
    }

    pub fn get_mut(&mut self, pointer: i64) -> Result<&mut u8> {
        let index = self.index(pointer)?;
        Ok(&mut self.cells[index])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    fn index(&self, pointer: i64) -> Result<usize> {
        usize::try_from(pointer)
            .ok()
            .filter(|&index| index < self.cells.len())
            .ok_or(VmError::InvalidAddress {
                pointer,
                tape_size: self.cells.len(),
            })
    }
}
