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

//! Lineshell Library
//!
//! A small telnet shell server built around a per-byte line-editing state
//! machine: control-character handling, arrow-key history navigation, and a
//! process-wide connection registry guaranteeing at-most-once release of
//! every session.

pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod registry;
pub mod session;
pub mod shell;
pub mod telnet;

// Re-export commonly used types
pub use context::ServerContext;
pub use editor::{LineEditor, Step};
pub use error::SessionError;
pub use registry::{ConnectionRegistry, SessionGuard};
pub use session::Session;
pub use shell::{Shell, ShellResult};
pub use telnet::TelnetServer;
