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

//! Telnet accept loop and per-connection session driver
//!
//! The server spawns one task per accepted connection. Each task registers
//! the session, then feeds received bytes into the line editor one at a
//! time. Committed lines go through the literal command shell. All exits —
//! peer close, control-byte termination, session error, forced shutdown —
//! funnel through the same teardown: the registration guard drops and the
//! task releases its socket and buffers by ownership.

use crate::context::ServerContext;
use crate::editor::Step;
use crate::error::SessionError;
use crate::registry::SessionGuard;
use crate::session::Session;
use crate::shell::ShellResult;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

/// Telnet server
pub struct TelnetServer {
    context: ServerContext,
}

impl TelnetServer {
    /// Create a new telnet server
    pub fn new(context: ServerContext) -> Self {
        Self { context }
    }

    /// Run the telnet server
    pub async fn run(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!("Telnet server accepting connections...");

        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    tracing::info!("New telnet connection from {}", addr);

                    let context = self.context.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, context).await {
                            tracing::error!(
                                "Error handling telnet connection from {}: {}",
                                addr,
                                e
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Error accepting telnet connection: {}", e);
                }
            }
        }
    }
}

/// Handle a single telnet connection
async fn handle_connection(
    mut stream: TcpStream,
    addr: SocketAddr,
    context: ServerContext,
) -> Result<(), SessionError> {
    let mut session = Session::new(addr, context.session_config())?;
    let token = CancellationToken::new();

    // Registration happens before the first read; the guard unregisters on
    // every exit path.
    let _guard = SessionGuard::register(
        Arc::clone(context.registry()),
        session.id,
        token.clone(),
    );
    tracing::info!("Session {} started for {}", session.id, addr);

    let result = drive_session(&mut stream, &mut session, &token, &context).await;

    tracing::info!(
        "Session {} for {} closed after {} seconds",
        session.id,
        addr,
        session.uptime().num_seconds()
    );

    result
}

/// Read loop: feed the editor byte by byte until the session ends
async fn drive_session(
    stream: &mut TcpStream,
    session: &mut Session,
    token: &CancellationToken,
    context: &ServerContext,
) -> Result<(), SessionError> {
    session.editor.send_prompt(stream).await?;
    stream.flush().await.map_err(SessionError::Send)?;

    let mut buffer = [0u8; 512];

    loop {
        let read = tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Session {} closed by shutdown cleanup", session.id);
                return Ok(());
            }
            read = stream.read(&mut buffer) => read,
        };

        match read {
            Ok(0) => {
                tracing::debug!("Session {} peer closed the connection", session.id);
                return Ok(());
            }
            Ok(n) => {
                for &byte in &buffer[..n] {
                    match session.editor.handle(byte, stream).await? {
                        Step::Continue => {}
                        Step::Committed(line) => {
                            if !respond(stream, session, &line, context).await? {
                                return Ok(());
                            }
                        }
                        Step::Terminate => {
                            tracing::debug!("Session {} terminated by client", session.id);
                            return Ok(());
                        }
                    }
                }
                stream.flush().await.map_err(SessionError::Send)?;
            }
            Err(e) => {
                // an externally forced close lands here as well; ordinary
                // end of input
                tracing::debug!("Session {} read failed: {}", session.id, e);
                return Ok(());
            }
        }
    }
}

/// Answer a committed line and re-send the prompt. Returns false when the
/// client asked to disconnect.
async fn respond(
    stream: &mut TcpStream,
    session: &Session,
    line: &[u8],
    context: &ServerContext,
) -> Result<bool, SessionError> {
    if !line.is_empty() {
        let command = String::from_utf8_lossy(line);
        tracing::debug!("Session {} command: {}", session.id, command);

        match context.shell().execute(&command) {
            ShellResult::Success(output) | ShellResult::Error(output) => {
                stream
                    .write_all(output.as_bytes())
                    .await
                    .map_err(SessionError::Send)?;
            }
            ShellResult::Quit => {
                stream
                    .write_all(b"Goodbye.\r\n")
                    .await
                    .map_err(SessionError::Send)?;
                stream.flush().await.map_err(SessionError::Send)?;
                return Ok(false);
            }
            ShellResult::Continue => {}
        }
    }

    stream
        .write_all(session.editor.prompt())
        .await
        .map_err(SessionError::Send)?;

    Ok(true)
}
