// crates/vuln-disclose-core/src/runtime/issue.rs
// ============================================================================
// Module: Vuln Disclose Issue State Machine
// Description: Single-step advancement of the issue-tracking sub-state.
// Purpose: Drive the tracking-issue phase of a disclosure case against an
// issue transport and the deadline policy.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! One call advances the issue-tracking sub-state by at most one logical
//! step. The finished state is returned unchanged, so reprocessing a
//! persisted step is always safe. The 35-day PMPVR request deadline is
//! evaluated before the transport is consulted: once it has passed, the
//! phase finishes without another update check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::IssuePhaseFinished;
use crate::core::IssuePhaseFinishedReason;
use crate::core::IssueProcessingState;
use crate::core::timeline::Clock;
use crate::core::timeline::DisclosureDeadlines;
use crate::interfaces::IssueTransport;
use crate::interfaces::IssueTransportError;

// ============================================================================
// SECTION: Issue State Machine
// ============================================================================

/// State machine advancing the issue-tracking phase of a disclosure case.
pub struct IssueStateMachine<T, C> {
    /// Issue transport collaborator.
    transport: T,
    /// Shared deadline policy.
    deadlines: DisclosureDeadlines<C>,
}

impl<T, C> IssueStateMachine<T, C>
where
    T: IssueTransport,
    C: Clock,
{
    /// Creates a new issue state machine.
    #[must_use]
    pub const fn new(transport: T, deadlines: DisclosureDeadlines<C>) -> Self {
        Self {
            transport,
            deadlines,
        }
    }

    /// Advances `state` by at most one logical step.
    ///
    /// The finished state is returned unchanged. A needed issue is created;
    /// an open issue is checked for updates only while the 35-day PMPVR
    /// request deadline has not been met.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTransportError`] when the transport fails; the error
    /// propagates to the orchestrator's caller, which owns retry cadence.
    pub async fn process_state_transition(
        &self,
        state: &IssueProcessingState,
    ) -> Result<IssueProcessingState, IssueTransportError> {
        match state {
            IssueProcessingState::Finished(_) => Ok(state.clone()),
            IssueProcessingState::Needed(needed) => self.transport.create_issue(needed).await,
            IssueProcessingState::Awaiting(awaiting) => {
                if self
                    .deadlines
                    .is_issue_pmpvr_request_deadline_met(awaiting.issue.creation_date)
                {
                    return Ok(IssueProcessingState::Finished(IssuePhaseFinished {
                        identifier: awaiting.identifier.clone(),
                        repository: awaiting.repository.clone(),
                        completed_reason: IssuePhaseFinishedReason::ThirtyFiveDaysPassed,
                        issue: Some(awaiting.issue.clone()),
                    }));
                }
                Ok(self.transport.check_for_update(awaiting).await?.into())
            }
        }
    }
}
