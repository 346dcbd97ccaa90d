//! Read-only summary of all sessions for the admin dashboard.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::aggregates::{Phase, Session};

/// Counts over a collection of sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    /// Number of sessions.
    pub total_sessions: u64,
    /// Sessions per current phase. Every phase is present, in declaration
    /// order, with zero for phases nobody is in.
    #[serde(serialize_with = "serialize_phase_counts")]
    pub sessions_by_phase: Vec<(Phase, u64)>,
    /// Quits per phase. Only phases somebody quit from are present, in
    /// declaration order.
    #[serde(serialize_with = "serialize_phase_counts")]
    pub quit_distribution: Vec<(Phase, u64)>,
    /// Sessions that ever reached `Fork`.
    pub completed_to_fork: u64,
    /// Sessions that exited.
    pub total_exited: u64,
}

impl SessionMetrics {
    /// Reduces `sessions` to their summary counts.
    pub fn from_sessions<'a, I>(sessions: I) -> Self
    where
        I: IntoIterator<Item = &'a Session>,
    {
        let mut by_phase = [0_u64; Phase::ALL.len()];
        let mut quits = [0_u64; Phase::ALL.len()];
        let mut total_sessions = 0;
        let mut completed_to_fork = 0;
        let mut total_exited = 0;

        for session in sessions {
            total_sessions += 1;
            by_phase[usize::from(session.current_phase().rank())] += 1;
            if let Some(quit) = session.quit_phase() {
                quits[usize::from(quit.rank())] += 1;
            }
            if session.timestamps().fork_reached_at.is_some() {
                completed_to_fork += 1;
            }
            if session.timestamps().exited_at.is_some() {
                total_exited += 1;
            }
        }

        let sessions_by_phase = Phase::ALL
            .into_iter()
            .map(|phase| (phase, by_phase[usize::from(phase.rank())]))
            .collect();
        let quit_distribution = Phase::ALL
            .into_iter()
            .map(|phase| (phase, quits[usize::from(phase.rank())]))
            .filter(|(_, count)| *count > 0)
            .collect();

        Self {
            total_sessions,
            sessions_by_phase,
            quit_distribution,
            completed_to_fork,
            total_exited,
        }
    }

    /// Number of sessions currently in `phase`.
    #[must_use]
    pub fn in_phase(&self, phase: Phase) -> u64 {
        lookup(&self.sessions_by_phase, phase)
    }

    /// Number of sessions that quit while in `phase`.
    #[must_use]
    pub fn quits_at(&self, phase: Phase) -> u64 {
        lookup(&self.quit_distribution, phase)
    }
}

fn lookup(counts: &[(Phase, u64)], phase: Phase) -> u64 {
    counts
        .iter()
        .find(|(p, _)| *p == phase)
        .map_or(0, |(_, count)| *count)
}

/// Writes phase counts as a JSON object keyed by phase name, keeping order.
fn serialize_phase_counts<S>(counts: &[(Phase, u64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (phase, count) in counts {
        map.serialize_entry(phase.as_str(), count)?;
    }
    map.end()
}
