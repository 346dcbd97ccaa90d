//! Commands for the Session Lifecycle context.

use soupbowl_core::command::Command;
use uuid::Uuid;

/// Command to start a new visitor session.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "session.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move a session to the next story phase.
#[derive(Debug, Clone)]
pub struct AdvancePhase {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to advance.
    pub session_id: Uuid,
}

impl Command for AdvancePhase {
    fn command_type(&self) -> &'static str {
        "session.advance_phase"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record that a visitor quit the story.
#[derive(Debug, Clone)]
pub struct MarkExited {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session that exited.
    pub session_id: Uuid,
}

impl Command for MarkExited {
    fn command_type(&self) -> &'static str {
        "session.mark_exited"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
