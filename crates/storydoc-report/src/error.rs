//! Reporter error types.

/// Error while handling a reporter event.
///
/// Step failures are not errors; they only affect the story verdict. These
/// variants cover broken runner contracts and sink failures.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A failed or restarted step arrived without its cause.
    #[error("missing cause for step \"{step}\"")]
    MissingCause {
        /// Step text as reported.
        step: String,
    },

    /// An event that needs an open story arrived while none was open.
    #[error("unexpected {event} event: no story is open")]
    UnexpectedEvent {
        /// Event name (see [`StoryEvent::name`](crate::StoryEvent::name)).
        event: &'static str,
    },

    /// Writing a finished story to the sink failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
