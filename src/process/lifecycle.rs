/*!
 * Process Lifecycle
 * Tracks which single state every process is in
 */

use super::types::{ProcessError, ProcessResult, ProcessState};
use crate::core::types::Pid;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct LifecycleTracker {
    states: BTreeMap<Pid, ProcessState>,
}

impl LifecycleTracker {
    /// Register every pid as pending
    pub fn new(pids: impl IntoIterator<Item = Pid>) -> Self {
        Self {
            states: pids
                .into_iter()
                .map(|pid| (pid, ProcessState::Pending))
                .collect(),
        }
    }

    pub fn state(&self, pid: Pid) -> Option<ProcessState> {
        self.states.get(&pid).copied()
    }

    /// Move `pid` to `next`, refusing transitions the lifecycle does not allow
    pub fn transition(&mut self, pid: Pid, next: ProcessState) -> ProcessResult<()> {
        let current = self
            .states
            .get_mut(&pid)
            .ok_or(ProcessError::ProcessNotFound(pid))?;
        if !current.can_transition_to(next) {
            return Err(ProcessError::InvalidStateTransition {
                pid,
                from: *current,
                to: next,
            });
        }
        *current = next;
        Ok(())
    }

    pub fn count(&self, state: ProcessState) -> usize {
        self.states.values().filter(|&&s| s == state).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pid, ProcessState)> + '_ {
        self.states.iter().map(|(&pid, &state)| (pid, state))
    }
}
