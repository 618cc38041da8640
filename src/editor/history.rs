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

//! Per-session command history
//!
//! Committed lines are kept oldest-first with a cursor in `[0, len]`;
//! `cursor == len` is the live (not browsing) position. While the user
//! browses, the live line is parked as a draft entry at the tail of the list
//! and removed again when browsing returns past the most recent entry.
//! Invariant: the draft, when present, is always the last entry and is never
//! a committed command — browsing is exactly `cursor < entries.len()`.

use crate::error::SessionError;

/// Ordered log of committed lines plus the navigation cursor
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Vec<u8>>,
    cursor: usize,
    draft: bool,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed lines, excluding any parked draft
    pub fn len(&self) -> usize {
        self.entries.len() - usize::from(self.draft)
    }

    /// True when no line has been committed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while the cursor points at a historical entry
    pub fn is_browsing(&self) -> bool {
        self.draft
    }

    /// Committed lines, oldest first
    pub fn committed(&self) -> &[Vec<u8>] {
        &self.entries[..self.len()]
    }

    /// Append a committed line and return the cursor to the live position.
    /// Any parked draft is discarded first: committing mid-browse commits
    /// what is displayed, not the parked live line.
    pub fn commit(&mut self, line: &[u8]) -> Result<(), SessionError> {
        self.discard_draft();
        let entry = copy_line(line)?;
        self.entries
            .try_reserve(1)
            .map_err(|_| SessionError::Allocation)?;
        self.entries.push(entry);
        self.cursor = self.entries.len();
        Ok(())
    }

    /// Leave browse mode without committing: the draft is discarded and the
    /// cursor returns to the live position. No-op when not browsing.
    pub fn end_browse(&mut self) {
        self.discard_draft();
        self.cursor = self.entries.len();
    }

    /// Move the cursor one entry towards the oldest line. On the first step
    /// away from the live position the live buffer is parked as the draft.
    /// Returns the entry to display, or None when already at the oldest.
    pub fn up(&mut self, live: &[u8]) -> Result<Option<Vec<u8>>, SessionError> {
        if self.cursor == 0 {
            return Ok(None);
        }
        if !self.draft {
            let parked = copy_line(live)?;
            self.entries
                .try_reserve(1)
                .map_err(|_| SessionError::Allocation)?;
            self.entries.push(parked);
            self.draft = true;
        }
        self.cursor -= 1;
        Ok(Some(copy_line(&self.entries[self.cursor])?))
    }

    /// Move the cursor one entry towards the live position. Stepping past the
    /// most recent committed line restores the parked draft and removes it.
    /// Returns the entry to display, or None when already live.
    pub fn down(&mut self) -> Result<Option<Vec<u8>>, SessionError> {
        if !self.draft {
            return Ok(None);
        }
        self.cursor += 1;
        if self.cursor == self.entries.len() - 1 {
            // reached the draft slot: hand the live line back and drop it
            self.draft = false;
            return Ok(self.entries.pop());
        }
        Ok(Some(copy_line(&self.entries[self.cursor])?))
    }

    fn discard_draft(&mut self) {
        if self.draft {
            self.entries.pop();
            self.draft = false;
        }
    }
}

fn copy_line(line: &[u8]) -> Result<Vec<u8>, SessionError> {
    let mut copy = Vec::new();
    copy.try_reserve_exact(line.len())
        .map_err(|_| SessionError::Allocation)?;
    copy.extend_from_slice(line);
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(lines: &[&[u8]]) -> History {
        let mut history = History::new();
        for line in lines {
            history.commit(line).unwrap();
        }
        history
    }

    #[test]
    fn test_commit_appends_and_resets_cursor() {
        let mut history = History::new();
        history.commit(b"first").unwrap();
        history.commit(b"second").unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.committed(), &[b"first".to_vec(), b"second".to_vec()]);
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_up_visits_most_recent_first() {
        let mut history = history_of(&[b"one", b"two", b"three"]);

        assert_eq!(history.up(b"").unwrap().unwrap(), b"three");
        assert_eq!(history.up(b"").unwrap().unwrap(), b"two");
        assert_eq!(history.up(b"").unwrap().unwrap(), b"one");
        // oldest reached: further presses are no-ops
        assert!(history.up(b"").unwrap().is_none());
        assert!(history.up(b"").unwrap().is_none());
    }

    #[test]
    fn test_up_on_empty_history_is_noop() {
        let mut history = History::new();
        assert!(history.up(b"typing").unwrap().is_none());
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_down_restores_draft() {
        let mut history = history_of(&[b"cmd"]);

        assert_eq!(history.up(b"half-typed").unwrap().unwrap(), b"cmd");
        assert!(history.is_browsing());

        // stepping back past the most recent entry restores the live line
        assert_eq!(history.down().unwrap().unwrap(), b"half-typed");
        assert!(!history.is_browsing());
        assert_eq!(history.len(), 1);

        // live position: further presses are no-ops
        assert!(history.down().unwrap().is_none());
    }

    #[test]
    fn test_down_walks_forward_through_entries() {
        let mut history = history_of(&[b"one", b"two", b"three"]);

        history.up(b"live").unwrap();
        history.up(b"live").unwrap();
        history.up(b"live").unwrap();

        assert_eq!(history.down().unwrap().unwrap(), b"two");
        assert_eq!(history.down().unwrap().unwrap(), b"three");
        assert_eq!(history.down().unwrap().unwrap(), b"live");
    }

    #[test]
    fn test_commit_mid_browse_discards_draft() {
        let mut history = history_of(&[b"old"]);

        history.up(b"draft-line").unwrap();
        history.commit(b"old").unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.committed(), &[b"old".to_vec(), b"old".to_vec()]);
        assert!(!history.is_browsing());
        // the draft never became a committed entry
        assert!(history.committed().iter().all(|e| e != b"draft-line"));
    }

    #[test]
    fn test_end_browse_discards_draft() {
        let mut history = history_of(&[b"cmd"]);

        history.up(b"typed").unwrap();
        history.end_browse();

        assert_eq!(history.len(), 1);
        assert!(!history.is_browsing());
        assert!(history.down().unwrap().is_none());
    }

    #[test]
    fn test_draft_is_always_last_entry() {
        let mut history = history_of(&[b"a", b"b"]);
        history.up(b"live").unwrap();

        assert!(history.is_browsing());
        assert_eq!(history.entries.last().unwrap(), b"live");
        assert_eq!(history.len(), 2);
    }
}
