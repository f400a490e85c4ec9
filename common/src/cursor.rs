//! Forward-only opaque pagination cursor.

use serde::{Deserialize, Serialize};


/// Pagination token handed out by the search executor.
///
/// Never parsed or built from parts on this side, only stored and replayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueCursor(String);

impl OpaqueCursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cursor and "more results" flag for the current query signature only.
///
/// There is no backward seek. The page number is cosmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationCursorManager {
    cursor: Option<OpaqueCursor>,
    has_more: bool,
    page_number: u32,
}

impl Default for PaginationCursorManager {
    fn default() -> Self {
        Self {
            cursor: None,
            has_more: true,
            page_number: 1,
        }
    }
}

impl PaginationCursorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the cursor; optimistic until the first response arrives.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advance(&mut self, next_cursor: Option<OpaqueCursor>, has_more: bool) {
        self.cursor = next_cursor;
        self.has_more = has_more;
    }

    pub fn current(&self) -> Option<&OpaqueCursor> {
        self.cursor.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// A next page can only be asked for with a cursor to replay.
    pub fn can_advance(&self) -> bool {
        self.has_more && self.cursor.is_some()
    }

    pub(crate) fn mark_exhausted(&mut self) {
        self.has_more = false;
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub(crate) fn count_page(&mut self) {
        self.page_number = self.page_number.saturating_add(1);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_the_cursor_and_is_optimistic() {
        let mut cursors = PaginationCursorManager::new();
        cursors.advance(Some(OpaqueCursor::new("C1")), false);
        cursors.count_page();

        cursors.reset();
        assert_eq!(cursors.current(), None);
        assert!(cursors.has_more());
        assert_eq!(cursors.page_number(), 1);
    }

    #[test]
    fn advance_stores_the_cursor_verbatim() {
        let mut cursors = PaginationCursorManager::new();
        cursors.advance(Some(OpaqueCursor::new("eyJvZmZzZXQiOjIwfQ==")), true);
        assert_eq!(cursors.current().map(OpaqueCursor::as_str), Some("eyJvZmZzZXQiOjIwfQ=="));
        assert!(cursors.can_advance());
    }

    #[test]
    fn cannot_advance_without_cursor_or_when_exhausted() {
        let mut cursors = PaginationCursorManager::new();
        assert!(!cursors.can_advance());

        cursors.advance(None, true);
        assert!(!cursors.can_advance());

        cursors.advance(Some(OpaqueCursor::new("C2")), false);
        assert!(!cursors.can_advance());
    }

    #[test]
    fn cursor_is_a_plain_json_string() {
        let cursor = OpaqueCursor::new("C1");
        assert_eq!(serde_json::to_string(&cursor).unwrap(), r#""C1""#);
    }
}
