#[derive(Debug)]
pub(crate) enum AppEvent {
    /// Completion text returned by the signing route for the pending turn.
    ChatCompleted(String),

    /// The relay failed (transport or provider error). Carries the reason
    /// for the log; the widget shows a generic apology bubble.
    ChatFailed(String),

    /// Request to exit the application gracefully.
    ExitRequest,
}
