//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Bounded edit buffer for the line editor

use crate::error::SessionError;

/// Fixed-capacity byte buffer holding the line currently being edited.
///
/// The storage is allocated once up front; `push` refuses input past the
/// capacity instead of growing.
#[derive(Debug)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    /// Create a buffer with the given fixed capacity
    pub fn new(capacity: usize) -> Result<Self, SessionError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| SessionError::Allocation)?;
        Ok(Self { bytes, capacity })
    }

    /// Maximum number of bytes the buffer accepts
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of bytes in the buffer
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no bytes have been entered
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current buffer content
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Append one byte, failing when the buffer is already at capacity.
    /// On failure the buffer is left unmodified.
    pub fn push(&mut self, byte: u8) -> Result<(), SessionError> {
        if self.bytes.len() == self.capacity {
            return Err(SessionError::BufferOverflow {
                capacity: self.capacity,
            });
        }
        self.bytes.push(byte);
        Ok(())
    }

    /// Remove the last byte; returns false on an empty buffer
    pub fn pop(&mut self) -> bool {
        self.bytes.pop().is_some()
    }

    /// Replace the buffer content. Content longer than the capacity is cut
    /// at the capacity; in practice every caller loads a line that was
    /// entered through this same buffer, so it always fits.
    pub fn load(&mut self, content: &[u8]) {
        let take = content.len().min(self.capacity);
        self.bytes.clear();
        self.bytes.extend_from_slice(&content[..take]);
    }

    /// Copy the content out and clear the buffer, keeping its storage
    pub fn take(&mut self) -> Result<Vec<u8>, SessionError> {
        let mut line = Vec::new();
        line.try_reserve_exact(self.bytes.len())
            .map_err(|_| SessionError::Allocation)?;
        line.extend_from_slice(&self.bytes);
        self.bytes.clear();
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut buffer = LineBuffer::new(4).unwrap();
        for byte in *b"abcd" {
            buffer.push(byte).unwrap();
        }
        assert_eq!(buffer.as_bytes(), b"abcd");
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_push_at_capacity_fails_without_modifying() {
        let mut buffer = LineBuffer::new(2).unwrap();
        buffer.push(b'a').unwrap();
        buffer.push(b'b').unwrap();

        let err = buffer.push(b'c').unwrap_err();
        assert!(matches!(err, SessionError::BufferOverflow { capacity: 2 }));
        assert_eq!(buffer.as_bytes(), b"ab");
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut buffer = LineBuffer::new(8).unwrap();
        assert!(!buffer.pop());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_take_clears_but_keeps_capacity() {
        let mut buffer = LineBuffer::new(8).unwrap();
        buffer.push(b'x').unwrap();
        buffer.push(b'y').unwrap();

        let line = buffer.take().unwrap();
        assert_eq!(line, b"xy");
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 8);

        // the buffer is usable again after take
        buffer.push(b'z').unwrap();
        assert_eq!(buffer.as_bytes(), b"z");
    }

    #[test]
    fn test_load_replaces_content() {
        let mut buffer = LineBuffer::new(8).unwrap();
        buffer.push(b'a').unwrap();
        buffer.load(b"hello");
        assert_eq!(buffer.as_bytes(), b"hello");
    }

    #[test]
    fn test_load_cuts_at_capacity() {
        let mut buffer = LineBuffer::new(3).unwrap();
        buffer.load(b"hello");
        assert_eq!(buffer.as_bytes(), b"hel");
    }
}
