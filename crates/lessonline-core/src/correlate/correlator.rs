//! Pairs independently arriving text and image fragments per session.
//!
//! State per (session, purpose): `Empty -> HalfText -> Empty` when the image
//! arrives, `Empty -> HalfImage -> Empty` when the text arrives. A second
//! fragment of the same kind overwrites the pending half. An unanswered half
//! expires after the half TTL and is evicted by the sweeper; nobody is told.
//!
//! The take-or-store step is exclusive per session, so a text and an image
//! arriving together cannot both miss each other and strand two halves.

use std::sync::Arc;

use dashmap::DashMap;

use lessonline_types::error::CollaboratorError;
use lessonline_types::fragment::{Fragment, FragmentKind};
use lessonline_types::lesson::LessonRecord;
use lessonline_types::ttl::Ttl;

use super::key::{UPDATE_LESSON, correlation_key, is_valid_purpose};
use crate::cache::ExpiringStore;
use crate::collaborator::LessonRecords;

/// What happened to a submitted fragment.
#[derive(Debug)]
pub enum Correlation {
    /// Empty payload; nothing stored, nothing emitted.
    Ignored,
    /// No counterpart was waiting; the fragment is now the pending half.
    Stored { kind: FragmentKind },
    /// The fragment completed a pair, which was handed to the record
    /// service. The counterpart has been cleared whatever the outcome.
    Completed(Result<LessonRecord, CollaboratorError>),
}

/// Correlates fragments through a shared [`ExpiringStore`].
pub struct FragmentCorrelator<R> {
    store: Arc<ExpiringStore<Fragment>>,
    records: Arc<R>,
    purpose: String,
    half_ttl: Ttl,
    /// Nothing is ever inserted. Holding a vacant entry for a session holds
    /// the write lock of its shard, which serializes that session's steps.
    sessions: DashMap<String, ()>,
}

impl<R: LessonRecords> FragmentCorrelator<R> {
    pub fn new(store: Arc<ExpiringStore<Fragment>>, records: Arc<R>, half_ttl: Ttl) -> Self {
        Self {
            store,
            records,
            purpose: UPDATE_LESSON.to_string(),
            half_ttl,
            sessions: DashMap::new(),
        }
    }

    /// Correlate under a different purpose.
    ///
    /// # Panics
    ///
    /// If `purpose` is empty or contains `_`; such a purpose could share
    /// keys with another one.
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        let purpose = purpose.into();
        assert!(is_valid_purpose(&purpose), "invalid purpose: {purpose:?}");
        self.purpose = purpose;
        self
    }

    pub fn store(&self) -> &Arc<ExpiringStore<Fragment>> {
        &self.store
    }

    pub fn half_ttl(&self) -> Ttl {
        self.half_ttl
    }

    /// Key of the `kind` half for `session`.
    pub fn key_for(&self, session: &str, kind: FragmentKind) -> String {
        correlation_key(&self.purpose, kind, session)
    }

    /// Submit one fragment for `session`.
    ///
    /// If the counterpart is pending it is taken out of the store before the
    /// record service is called, so it is cleared even when that call fails
    /// and can never join a second pair. Otherwise the fragment is stored as
    /// the pending half, replacing any earlier half of the same kind.
    pub async fn submit(&self, session: &str, fragment: Fragment) -> Correlation {
        if fragment.is_empty() {
            tracing::debug!(session, kind = %fragment.kind(), "ignoring empty fragment");
            return Correlation::Ignored;
        }

        let kind = fragment.kind();
        let counterpart_key = self.key_for(session, kind.counterpart());

        let pair = {
            // Released before the record service is awaited.
            let _session = self.sessions.entry(session.to_string());

            let Some(counterpart) = self.store.take(&counterpart_key) else {
                return self.store_half(session, fragment);
            };
            match fragment.pair_with(counterpart) {
                Ok(pair) => pair,
                Err(fragment) => {
                    tracing::warn!(key = %counterpart_key, "pending half had the wrong kind, discarded");
                    return self.store_half(session, fragment);
                }
            }
        };

        tracing::info!(
            session,
            completed_by = %kind,
            text_len = pair.text.len(),
            image_len = pair.image.len(),
            "fragment pair completed"
        );

        let result = self.records.create(pair).await;
        match &result {
            Ok(record) => tracing::info!(session, key = %record.key, "lesson recorded"),
            Err(e) => tracing::error!(session, error = %e, "lesson record creation failed; pair dropped"),
        }
        Correlation::Completed(result)
    }

    fn store_half(&self, session: &str, fragment: Fragment) -> Correlation {
        let kind = fragment.kind();
        let key = self.key_for(session, kind);
        let size = fragment.len();
        self.store.set(key.as_str(), fragment, self.half_ttl);
        tracing::debug!(session, %kind, %key, size, ttl = %self.half_ttl, "stored pending half");
        Correlation::Stored { kind }
    }
}
