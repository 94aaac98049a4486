//! Client-side holder of the current sheet.
//!
//! Every mutation is applied locally first (optimistic) and then queued for a
//! full-document submission. A failed submission is reported on its ticket
//! and logged but never rolled back or retried.

mod sync;

use std::sync::Arc;

use crate::client::{SheetTransport, TransportError};
use crate::models::*;
use crate::tree;

pub use sync::{SyncQueue, SyncTicket};

/// The single current sheet of a client session, or "loading" before `load`.
///
/// Accessed from one thread of control; mutations take `&mut self` and are
/// visible as soon as they return.
pub struct SheetStore<T: SheetTransport> {
    transport: Arc<T>,
    sheet: Option<Sheet>,
    sync: SyncQueue,
}

impl<T: SheetTransport> SheetStore<T> {
    /// Create an unloaded store. Must be called from within a tokio runtime.
    pub fn new(transport: T) -> Self {
        let transport = Arc::new(transport);
        let sync = SyncQueue::spawn(Arc::clone(&transport));
        Self {
            transport,
            sheet: None,
            sync,
        }
    }

    /// Fetch the full sheet and replace local state with it verbatim.
    ///
    /// On failure the store keeps whatever it held before (still loading if
    /// this was the first attempt).
    pub async fn load(&mut self) -> Result<(), TransportError> {
        let sheet = self.transport.fetch_document().await?;
        tracing::debug!("Loaded sheet with {} topics", sheet.topics.len());
        self.sheet = Some(sheet);
        Ok(())
    }

    pub fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.sheet.is_some()
    }

    /// Wait until every submission queued so far has been attempted.
    pub async fn flush(&self) {
        self.sync.flush().await;
    }

    /// Apply a tree transformation locally, then queue the result for sync.
    fn apply(&mut self, op: impl FnOnce(&Sheet) -> Sheet) -> Option<SyncTicket> {
        let next = op(self.sheet.as_ref()?);
        self.sheet = Some(next.clone());
        Some(self.sync.submit(next))
    }

    // ============================================================
    // Topics
    // ============================================================

    pub fn add_topic(&mut self, title: &str) -> Option<SyncTicket> {
        self.apply(|s| tree::add_topic(s, title))
    }

    pub fn delete_topic(&mut self, topic_id: &str) -> Option<SyncTicket> {
        self.apply(|s| tree::delete_topic(s, topic_id))
    }

    pub fn edit_topic(&mut self, topic_id: &str, title: &str) -> Option<SyncTicket> {
        self.apply(|s| tree::edit_topic(s, topic_id, title))
    }

    pub fn reorder_topics(&mut self, old_index: usize, new_index: usize) -> Option<SyncTicket> {
        self.apply(|s| tree::reorder_topics(s, old_index, new_index))
    }

    // ============================================================
    // Sub-topics
    // ============================================================

    pub fn add_sub_topic(&mut self, topic_id: &str, title: &str) -> Option<SyncTicket> {
        self.apply(|s| tree::add_sub_topic(s, topic_id, title))
    }

    pub fn delete_sub_topic(&mut self, topic_id: &str, sub_id: &str) -> Option<SyncTicket> {
        self.apply(|s| tree::delete_sub_topic(s, topic_id, sub_id))
    }

    pub fn edit_sub_topic(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        title: &str,
    ) -> Option<SyncTicket> {
        self.apply(|s| tree::edit_sub_topic(s, topic_id, sub_id, title))
    }

    pub fn reorder_sub_topics(
        &mut self,
        topic_id: &str,
        old_index: usize,
        new_index: usize,
    ) -> Option<SyncTicket> {
        self.apply(|s| tree::reorder_sub_topics(s, topic_id, old_index, new_index))
    }

    // ============================================================
    // Questions
    // ============================================================

    pub fn add_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        fields: &NewQuestion,
    ) -> Option<SyncTicket> {
        self.apply(|s| tree::add_question(s, topic_id, sub_id, fields))
    }

    pub fn delete_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
    ) -> Option<SyncTicket> {
        self.apply(|s| tree::delete_question(s, topic_id, sub_id, question_id))
    }

    pub fn edit_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
        patch: &QuestionPatch,
    ) -> Option<SyncTicket> {
        self.apply(|s| tree::edit_question(s, topic_id, sub_id, question_id, patch))
    }

    pub fn reorder_questions(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        old_index: usize,
        new_index: usize,
    ) -> Option<SyncTicket> {
        self.apply(|s| tree::reorder_questions(s, topic_id, sub_id, old_index, new_index))
    }

    pub fn toggle_question_completion(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
    ) -> Option<SyncTicket> {
        self.apply(|s| tree::toggle_question_completion(s, topic_id, sub_id, question_id))
    }
}
