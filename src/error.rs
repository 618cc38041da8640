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

//! Session-local failure kinds
//!
//! Every variant terminates the session it occurs in; none of them propagate
//! to the accept loop or to other sessions.

use thiserror::Error;

/// Errors that end a single telnet session
#[derive(Debug, Error)]
pub enum SessionError {
    /// A write to the client channel errored or came up short. Never retried.
    #[error("failed to send to client: {0}")]
    Send(#[source] std::io::Error),

    /// A printable byte arrived while the edit buffer was full. The input is
    /// neither truncated nor retried.
    #[error("input line exceeds {capacity} bytes")]
    BufferOverflow { capacity: usize },

    /// Backing storage for the edit buffer or the command history could not
    /// grow.
    #[error("failed to allocate session storage")]
    Allocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::BufferOverflow { capacity: 256 };
        assert_eq!(err.to_string(), "input line exceeds 256 bytes");

        let err = SessionError::Allocation;
        assert_eq!(err.to_string(), "failed to allocate session storage");
    }

    #[test]
    fn test_send_error_carries_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = SessionError::Send(io);
        assert!(err.to_string().starts_with("failed to send to client"));
    }
}
