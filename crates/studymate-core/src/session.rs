//! Caller-owned study session state.
//!
//! A [`StudySession`] holds the chunks of the most recently processed batch
//! together with running activity counters. Nothing here is global: the
//! caller creates a session, passes it into each operation, and decides
//! whether and where to keep it.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{Chunk, ProcessedBatch};

/// Kind of activity logged in [`StudyStats::sessions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    Processed,
}

impl std::fmt::Display for SessionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionAction::Processed => "processed",
        };
        f.write_str(s)
    }
}

/// One logged study activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: DateTime<Local>,
    /// Pages covered by the activity; zero for activities that read no new pages.
    pub pages: usize,
    pub action: SessionAction,
}

/// Running counters shown on the progress page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyStats {
    pub sessions: Vec<SessionRecord>,
    pub pages_read: usize,
    pub flashcards_created: usize,
    pub quizzes_taken: usize,
}

impl StudyStats {
    /// The most recently logged activity, if any.
    pub fn last_session(&self) -> Option<&SessionRecord> {
        self.sessions.last()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub processed: bool,
    pub chunks: Vec<Chunk>,
    pub total_pages: usize,
    pub stats: StudyStats,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly processed batch as the session's working material.
    pub fn record_batch(&mut self, batch: ProcessedBatch) {
        self.record_batch_at(batch, Local::now());
    }

    /// Same as [`record_batch`](Self::record_batch) with an explicit timestamp.
    pub fn record_batch_at(&mut self, batch: ProcessedBatch, at: DateTime<Local>) {
        tracing::debug!(
            pages = batch.total_pages,
            chunks = batch.chunks.len(),
            files = batch.file_count,
            "recording processed batch"
        );
        self.stats.pages_read += batch.total_pages;
        self.stats.sessions.push(SessionRecord {
            date: at,
            pages: batch.total_pages,
            action: SessionAction::Processed,
        });
        self.total_pages = batch.total_pages;
        self.chunks = batch.chunks;
        self.processed = true;
    }

    /// Count a set of generated flashcards. Only processed batches are logged.
    pub fn record_flashcards(&mut self, count: usize) {
        self.stats.flashcards_created += count;
    }

    /// Count one generated quiz, regardless of its question count.
    pub fn record_quiz(&mut self) {
        self.stats.quizzes_taken += 1;
    }
}
