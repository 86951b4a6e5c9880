/// Story-session precondition violations.
///
/// These indicate the caller's view of the session is out of sync with the
/// engine's, so they are surfaced instead of ignored.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {session_id}")]
    UnknownSession { session_id: String },

    #[error("image {image_id} is not part of the current story")]
    ImageNotInStory { image_id: String },

    #[error("no story has been started in this session")]
    NoActiveStory,

    #[error("session lock poisoned: {session_id}")]
    Poisoned { session_id: String },
}
