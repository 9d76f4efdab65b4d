use anyhow::Result;

/// Side-effect hooks fired by a session (sound cues, toasts).
///
/// Errors are logged by the session and never interrupt the quiz.
pub trait QuizObserver {
    fn on_correct(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_incorrect(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_hint_shown(&mut self, _hint: &str) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl QuizObserver for NoopObserver {}
