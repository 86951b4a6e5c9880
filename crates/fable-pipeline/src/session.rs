//! Story sessions: the prompt, phase and committed story state of one
//! interactive story, keyed by session id.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use tracing::debug;

use fable_core::errors::{FableResult, SessionError};
use fable_core::models::{StoryPhase, StoryState};

/// One interactive story.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorySession {
    pub session_id: String,
    /// Normalized title the story is generated from.
    pub prompt: Option<String>,
    pub phase: StoryPhase,
    pub state: StoryState,
}

impl StorySession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    /// Forget the current story and start over from `prompt`.
    pub fn restart(&mut self, prompt: String) {
        self.state.clear();
        self.prompt = Some(prompt);
        self.phase = StoryPhase::Idle;
    }

    pub fn active_prompt(&self) -> FableResult<&str> {
        self.prompt
            .as_deref()
            .ok_or_else(|| SessionError::NoActiveStory.into())
    }

    pub fn record_extract(&mut self, extract: impl Into<String>) {
        self.state.extracts.push(extract.into());
    }

    /// Add `image_id`, or remove it when `remove` is set. Removing an id the
    /// story does not contain is an error.
    pub fn record_image(&mut self, image_id: &str, remove: bool) -> FableResult<()> {
        if !remove {
            self.state.image_ids.push(image_id.to_string());
            return Ok(());
        }
        let position = self
            .state
            .image_ids
            .iter()
            .position(|id| id == image_id)
            .ok_or_else(|| SessionError::ImageNotInStory {
                image_id: image_id.to_string(),
            })?;
        self.state.image_ids.remove(position);
        Ok(())
    }
}

/// Concurrent session registry. Sessions are independent; each is locked
/// for the whole of any operation on it.
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<String, Arc<Mutex<StorySession>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session for `session_id`, created empty when new.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<StorySession>> {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id, "created story session");
                Arc::new(Mutex::new(StorySession::new(session_id)))
            })
            .clone()
    }

    pub fn get(&self, session_id: &str) -> FableResult<Arc<Mutex<StorySession>>> {
        self.sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                SessionError::UnknownSession {
                    session_id: session_id.to_string(),
                }
                .into()
            })
    }

    /// Cloned snapshot of a session.
    pub fn snapshot(&self, session_id: &str) -> FableResult<StorySession> {
        let session = self.get(session_id)?;
        let guard = lock(&session, session_id)?;
        Ok(guard.clone())
    }

    pub fn remove(&self, session_id: &str) -> Option<Arc<Mutex<StorySession>>> {
        self.sessions.remove(session_id).map(|(_, v)| v)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}

/// Lock a session, surfacing poisoning as a session error.
pub fn lock<'a>(
    session: &'a Mutex<StorySession>,
    session_id: &str,
) -> FableResult<MutexGuard<'a, StorySession>> {
    session.lock().map_err(|_| {
        SessionError::Poisoned {
            session_id: session_id.to_string(),
        }
        .into()
    })
}
