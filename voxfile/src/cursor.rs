use crate::error::DecodeError;

// -------------------------------------------------------------------------------------------------

/// Sequential, bounds-checked reader over a byte buffer.
///
/// All multi-byte reads are little-endian, per the `.vox` container format.
/// Reads that would run past the end of the buffer return
/// [`DecodeError::OutOfBounds`] rather than panicking, with the exception of
/// [`read_tag()`](Self::read_tag), which truncates (see its documentation).
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Constructs a cursor positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Current read position, as a byte offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes between the read position and the end of the buffer.
    ///
    /// Callers use this to pre-validate a multi-byte structure before
    /// committing to reading it.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// Moves the read position to `offset`, clamped to the end of the buffer.
    ///
    /// Used to jump from one chunk boundary to the next.
    pub fn seek_to(&mut self, offset: usize) {
        self.position = offset.min(self.bytes.len());
    }

    /// Reads `len` bytes as ASCII characters.
    ///
    /// If fewer than `len` bytes remain, the available prefix is returned
    /// rather than an error, so that a corrupt trailing chunk yields a
    /// harmless wrong tag instead of a hard failure.
    pub fn read_tag(&mut self, len: usize) -> String {
        let available = len.min(self.remaining());
        let tag = self.bytes[self.position..self.position + available]
            .iter()
            .map(|&byte| char::from(byte))
            .collect();
        self.position += available;
        tag
    }

    /// Reads an unsigned 32-bit little-endian integer.
    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        let slice = self
            .bytes
            .get(self.position..self.position + 4)
            .ok_or(DecodeError::OutOfBounds {
                offset: self.position,
                len: 4,
            })?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(slice);
        self.position += 4;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a single unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self
            .bytes
            .get(self.position)
            .ok_or(DecodeError::OutOfBounds {
                offset: self.position,
                len: 1,
            })?;
        self.position += 1;
        Ok(byte)
    }
}

// -------------------------------------------------------------------------------------------------
