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

//! Per-byte line-editing state machine
//!
//! The editor consumes the raw telnet byte stream one byte at a time,
//! maintaining the edit buffer and the command history, and echoing all
//! session output (characters, erase sequences, history redraws) back
//! through the connection. Termination is signaled through the return value
//! of [`LineEditor::handle`], never through a state.

pub mod buffer;
pub mod history;

use crate::error::SessionError;
use buffer::LineBuffer;
use history::History;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const ETX: u8 = 0x03;
const EOT: u8 = 0x04;
const BACKSPACE: u8 = 0x08;
const LINE_FEED: u8 = 0x0A;
const CARRIAGE_RETURN: u8 = 0x0D;
const ESCAPE: u8 = 0x1B;
const DELETE: u8 = 0x7F;

/// Erase sequence for one character: back, blank, back
const ERASE: &[u8] = b"\x08 \x08";

/// Return to column zero and clear to end of line
const CLEAR_LINE: &[u8] = b"\r\x1b[K";

/// Editing states. `EscapeSeen` and `BracketSeen` track the progress of the
/// 3-byte arrow-key sequence `ESC [ A..D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorState {
    Normal,
    EscapeSeen,
    BracketSeen,
}

/// Outcome of feeding one byte into the editor
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Keep feeding bytes
    Continue,

    /// A CR/LF was processed. Carries the committed line, which is empty when
    /// the buffer was empty (nothing was stored in history). The driver is
    /// expected to answer the line and re-send the prompt.
    Committed(Vec<u8>),

    /// The client asked to end the session (interrupt / end-of-transmission)
    Terminate,
}

/// Line-editing state machine for one session
#[derive(Debug)]
pub struct LineEditor {
    state: EditorState,
    buffer: LineBuffer,
    history: History,
    prompt: Vec<u8>,
}

impl LineEditor {
    /// Create an editor with the given prompt and line capacity
    pub fn new(prompt: &str, capacity: usize) -> Result<Self, SessionError> {
        Ok(Self {
            state: EditorState::Normal,
            buffer: LineBuffer::new(capacity)?,
            history: History::new(),
            prompt: prompt.as_bytes().to_vec(),
        })
    }

    /// Prompt bytes shown before each line
    pub fn prompt(&self) -> &[u8] {
        &self.prompt
    }

    /// Content of the edit buffer
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Command history of this session
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Send the prompt to the client
    pub async fn send_prompt<W>(&self, out: &mut W) -> Result<(), SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        send(out, &self.prompt).await
    }

    /// Feed one received byte through the state machine
    pub async fn handle<W>(&mut self, byte: u8, out: &mut W) -> Result<Step, SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        match self.state {
            EditorState::Normal => self.dispatch(byte, out).await,
            EditorState::EscapeSeen => {
                if byte == b'[' {
                    self.state = EditorState::BracketSeen;
                    Ok(Step::Continue)
                } else {
                    // not an escape sequence after all
                    self.state = EditorState::Normal;
                    self.dispatch(byte, out).await
                }
            }
            EditorState::BracketSeen => {
                self.state = EditorState::Normal;
                match byte {
                    b'A' => self.recall_previous(out).await,
                    b'B' => self.recall_next(out).await,
                    // right/left reserved for cursor movement within the line
                    b'C' | b'D' => Ok(Step::Continue),
                    other => self.dispatch(other, out).await,
                }
            }
        }
    }

    /// Normal-state handling of a single byte
    async fn dispatch<W>(&mut self, byte: u8, out: &mut W) -> Result<Step, SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        match byte {
            ETX | EOT => Ok(Step::Terminate),

            CARRIAGE_RETURN | LINE_FEED => {
                send(out, b"\r\n").await?;
                let line = self.buffer.take()?;
                if line.is_empty() {
                    self.history.end_browse();
                } else {
                    self.history.commit(&line)?;
                }
                Ok(Step::Committed(line))
            }

            ESCAPE => {
                self.state = EditorState::EscapeSeen;
                Ok(Step::Continue)
            }

            BACKSPACE | DELETE => {
                if self.buffer.pop() {
                    send(out, ERASE).await?;
                }
                Ok(Step::Continue)
            }

            // printable ASCII: append and echo
            0x20..=0x7E => {
                self.buffer.push(byte)?;
                send(out, &[byte]).await?;
                Ok(Step::Continue)
            }

            // every other control byte is dropped silently
            _ => Ok(Step::Continue),
        }
    }

    /// Arrow up: show the previous history entry
    async fn recall_previous<W>(&mut self, out: &mut W) -> Result<Step, SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        if let Some(entry) = self.history.up(self.buffer.as_bytes())? {
            self.buffer.load(&entry);
            self.redraw(out).await?;
        }
        Ok(Step::Continue)
    }

    /// Arrow down: show the next history entry, or restore the live line
    async fn recall_next<W>(&mut self, out: &mut W) -> Result<Step, SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        if let Some(entry) = self.history.down()? {
            self.buffer.load(&entry);
            self.redraw(out).await?;
        }
        Ok(Step::Continue)
    }

    /// Repaint the input line: column zero, clear, prompt, buffer
    async fn redraw<W>(&self, out: &mut W) -> Result<(), SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        send(out, CLEAR_LINE).await?;
        send(out, &self.prompt).await?;
        send(out, self.buffer.as_bytes()).await
    }
}

async fn send<W>(out: &mut W, bytes: &[u8]) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(bytes).await.map_err(SessionError::Send)
}
