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

use crate::config::SessionConfig;
use crate::registry::ConnectionRegistry;
use crate::shell::Shell;
use std::sync::Arc;

/// Server context containing shared resources.
///
/// Constructed once at startup and cloned into every connection task; the
/// registry is the only piece holding cross-session mutable state.
#[derive(Debug, Clone)]
pub struct ServerContext {
    /// Registry of live connections
    pub registry: Arc<ConnectionRegistry>,

    /// Literal command shell
    pub shell: Arc<Shell>,

    /// Per-session settings (prompt, line capacity)
    pub session: Arc<SessionConfig>,
}

impl ServerContext {
    /// Create a new server context
    pub fn new(session: SessionConfig) -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            shell: Arc::new(Shell::new()),
            session: Arc::new(session),
        }
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Get the command shell
    pub fn shell(&self) -> &Arc<Shell> {
        &self.shell
    }

    /// Get the session settings
    pub fn session_config(&self) -> &SessionConfig {
        &self.session
    }
}
