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

//! Literal command lookup
//!
//! Maps committed lines to canned responses. This table is deliberately
//! trivial and replaceable; it carries no state and is not part of the
//! editing state machine.

/// Shell command result
#[derive(Debug)]
pub enum ShellResult {
    /// Command recognized; response text to send (CRLF-terminated)
    Success(String),
    /// Command not recognized; error text to send (CRLF-terminated)
    Error(String),
    /// Request to disconnect
    Quit,
    /// Nothing to do (blank input)
    Continue,
}

const HELP_TEXT: &str = "\r\nAvailable commands:\r\n\
  help, ?      - show this help message\r\n\
  quit, exit   - close the connection\r\n\r\n";

/// Shell command handler
#[derive(Debug, Default)]
pub struct Shell;

impl Shell {
    /// Create a new shell instance
    pub fn new() -> Self {
        Self
    }

    /// Look up a committed line
    pub fn execute(&self, input: &str) -> ShellResult {
        let input = input.trim();

        if input.is_empty() {
            return ShellResult::Continue;
        }

        let command = input
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match command.as_str() {
            "help" | "?" => ShellResult::Success(HELP_TEXT.to_string()),
            "quit" | "exit" | "logout" => ShellResult::Quit,
            _ => ShellResult::Error(format!(
                "Unknown command: {}. Type 'help' for available commands.\r\n",
                command
            )),
        }
    }
}
