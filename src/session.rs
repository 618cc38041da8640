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

//! Per-connection session state

use crate::config::SessionConfig;
use crate::editor::LineEditor;
use crate::error::SessionError;
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use uuid::Uuid;

/// One accepted connection: identity plus editing state. Owned exclusively
/// by the task handling the connection; dropped when that task returns.
#[derive(Debug)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// Client peer address
    pub client_addr: SocketAddr,

    /// Connection timestamp
    pub connected_at: DateTime<Utc>,

    /// Line-editing state machine for this connection
    pub editor: LineEditor,
}

impl Session {
    /// Create the session state for a freshly accepted connection
    pub fn new(client_addr: SocketAddr, config: &SessionConfig) -> Result<Self, SessionError> {
        Ok(Self {
            id: Uuid::new_v4(),
            client_addr,
            connected_at: Utc::now(),
            editor: LineEditor::new(&config.prompt, config.line_capacity)?,
        })
    }

    /// Time this session has been connected
    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.connected_at
    }
}
