//! Aggregate roots for the Session Lifecycle context.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use soupbowl_core::aggregate::AggregateRoot;
use soupbowl_core::clock::Clock;
use soupbowl_core::error::DomainError;
use uuid::Uuid;

/// Story phase state machine.
///
/// The forward order is linear; `Exited` sits outside it and is only
/// reachable through [`Session::mark_exited`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    HazardWarning,
    ComfortBait,
    HiddenFailure,
    Reveal,
    Fork,
    Readings,
    Exited,
}

impl Phase {
    /// Every phase, in declaration order.
    pub const ALL: [Phase; 7] = [
        Phase::HazardWarning,
        Phase::ComfortBait,
        Phase::HiddenFailure,
        Phase::Reveal,
        Phase::Fork,
        Phase::Readings,
        Phase::Exited,
    ];

    /// Explicit position in the story order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Phase::HazardWarning => 0,
            Phase::ComfortBait => 1,
            Phase::HiddenFailure => 2,
            Phase::Reveal => 3,
            Phase::Fork => 4,
            Phase::Readings => 5,
            Phase::Exited => 6,
        }
    }

    /// The phase reached by one forward step. `Readings` and `Exited` map to
    /// themselves.
    #[must_use]
    pub const fn successor(self) -> Phase {
        match self {
            Phase::HazardWarning => Phase::ComfortBait,
            Phase::ComfortBait => Phase::HiddenFailure,
            Phase::HiddenFailure => Phase::Reveal,
            Phase::Reveal => Phase::Fork,
            Phase::Fork | Phase::Readings => Phase::Readings,
            Phase::Exited => Phase::Exited,
        }
    }

    /// Whether `target` is the one legal forward move from this phase.
    #[must_use]
    pub fn can_advance_to(self, target: Phase) -> bool {
        !self.is_terminal() && self.successor() == target
    }

    /// Whether this phase is a fixed point of [`Phase::successor`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Readings | Phase::Exited)
    }

    /// Whether a session in this phase may read the readings library.
    #[must_use]
    pub const fn unlocks_readings(self) -> bool {
        matches!(self, Phase::Fork | Phase::Readings | Phase::Exited)
    }

    /// The persisted and wire name of this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::HazardWarning => "HAZARD_WARNING",
            Phase::ComfortBait => "COMFORT_BAIT",
            Phase::HiddenFailure => "HIDDEN_FAILURE",
            Phase::Reveal => "REVEAL",
            Phase::Fork => "FORK",
            Phase::Readings => "READINGS",
            Phase::Exited => "EXITED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown phase: {s}")))
    }
}

/// Instants at which a session entered each milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTimestamps {
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Set on entering `ComfortBait`.
    pub hazard_accepted_at: Option<DateTime<Utc>>,
    /// Set on entering `HiddenFailure`.
    pub code_submitted_at: Option<DateTime<Utc>>,
    /// Set on entering `Reveal`.
    pub failure_revealed_at: Option<DateTime<Utc>>,
    /// Set on entering `Fork`.
    pub fork_reached_at: Option<DateTime<Utc>>,
    /// Set on exit.
    pub exited_at: Option<DateTime<Utc>>,
}

impl PhaseTimestamps {
    fn starting_at(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            hazard_accepted_at: None,
            code_submitted_at: None,
            failure_revealed_at: None,
            fork_reached_at: None,
            exited_at: None,
        }
    }

    /// The milestone slot stamped when `entered` is entered, if any.
    fn slot_for(&mut self, entered: Phase) -> Option<&mut Option<DateTime<Utc>>> {
        match entered {
            Phase::ComfortBait => Some(&mut self.hazard_accepted_at),
            Phase::HiddenFailure => Some(&mut self.code_submitted_at),
            Phase::Reveal => Some(&mut self.failure_revealed_at),
            Phase::Fork => Some(&mut self.fork_reached_at),
            Phase::HazardWarning | Phase::Readings | Phase::Exited => None,
        }
    }
}

/// The aggregate root for a visitor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    current_phase: Phase,
    quit_phase: Option<Phase>,
    timestamps: PhaseTimestamps,
}

impl Session {
    /// Starts a new session at `HazardWarning`.
    #[must_use]
    pub fn start(id: Uuid, clock: &dyn Clock) -> Self {
        Self {
            id,
            current_phase: Phase::HazardWarning,
            quit_phase: None,
            timestamps: PhaseTimestamps::starting_at(clock.now()),
        }
    }

    /// Rebuilds a session from persisted state without re-running any
    /// transition.
    #[must_use]
    pub fn restore(
        id: Uuid,
        current_phase: Phase,
        quit_phase: Option<Phase>,
        timestamps: PhaseTimestamps,
    ) -> Self {
        Self {
            id,
            current_phase,
            quit_phase,
            timestamps,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The phase the visitor is currently in.
    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }

    /// The phase the visitor was in when they quit, if they quit.
    #[must_use]
    pub fn quit_phase(&self) -> Option<Phase> {
        self.quit_phase
    }

    /// Milestone timestamps.
    #[must_use]
    pub fn timestamps(&self) -> &PhaseTimestamps {
        &self.timestamps
    }

    /// Whether this session may read the readings library.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.current_phase.unlocks_readings()
    }

    /// Moves the session one step forward and stamps the milestone of the
    /// phase it enters. Returns the newly entered phase.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TerminalState` from `Readings` or `Exited`.
    pub fn advance_phase(&mut self, clock: &dyn Clock) -> Result<Phase, DomainError> {
        let current = self.current_phase;
        let next = current.successor();
        if !current.can_advance_to(next) {
            return Err(DomainError::TerminalState(current.to_string()));
        }
        debug_assert!(next.rank() > current.rank());

        if let Some(slot) = self.timestamps.slot_for(next) {
            if slot.is_none() {
                *slot = Some(clock.now());
            }
        }
        self.current_phase = next;
        Ok(next)
    }

    /// Records that the visitor quit. The phase they were in becomes the
    /// quit phase and the session moves to `Exited`.
    ///
    /// Calling this on an exited session changes nothing.
    pub fn mark_exited(&mut self, clock: &dyn Clock) {
        if self.current_phase == Phase::Exited {
            return;
        }
        if self.quit_phase.is_none() {
            self.quit_phase = Some(self.current_phase);
        }
        if self.timestamps.exited_at.is_none() {
            self.timestamps.exited_at = Some(clock.now());
        }
        self.current_phase = Phase::Exited;
    }
}

impl AggregateRoot for Session {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }
}
