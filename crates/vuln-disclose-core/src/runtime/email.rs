// crates/vuln-disclose-core/src/runtime/email.rs
// ============================================================================
// Module: Vuln Disclose Email State Machine
// Description: Single-step advancement of the email-contact sub-state.
// Purpose: Drive the email phase of a disclosure case against an email
// transport and the deadline policy.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! One call advances the email-contact sub-state by at most one logical step.
//! End states are returned unchanged, so reprocessing a persisted step is
//! always safe. The 90-day deadline is evaluated before the transport is
//! consulted: once it has passed, the phase finishes without another
//! response check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::EmailPhaseFinished;
use crate::core::EmailPhaseFinishedReason;
use crate::core::EmailProcessingState;
use crate::core::timeline::Clock;
use crate::core::timeline::DisclosureDeadlines;
use crate::interfaces::EmailTransport;
use crate::interfaces::EmailTransportError;

// ============================================================================
// SECTION: Email State Machine
// ============================================================================

/// State machine advancing the email-contact phase of a disclosure case.
pub struct EmailStateMachine<T, C> {
    /// Email transport collaborator.
    transport: T,
    /// Shared deadline policy.
    deadlines: DisclosureDeadlines<C>,
}

impl<T, C> EmailStateMachine<T, C>
where
    T: EmailTransport,
    C: Clock,
{
    /// Creates a new email state machine.
    #[must_use]
    pub const fn new(transport: T, deadlines: DisclosureDeadlines<C>) -> Self {
        Self {
            transport,
            deadlines,
        }
    }

    /// Advances `state` by at most one logical step.
    ///
    /// End states are returned unchanged. A queued send is attempted; an
    /// awaited response is checked only while the 90-day disclosure deadline
    /// has not been met.
    ///
    /// # Errors
    ///
    /// Returns [`EmailTransportError`] when the transport fails; the error
    /// propagates to the orchestrator's caller, which owns retry cadence.
    pub async fn process_state_transition(
        &self,
        state: &EmailProcessingState,
    ) -> Result<EmailProcessingState, EmailTransportError> {
        match state {
            EmailProcessingState::FixInvalid(_)
            | EmailProcessingState::NotAVulnerability(_)
            | EmailProcessingState::Finished(_) => Ok(state.clone()),
            EmailProcessingState::SendQueued(queued) => {
                Ok(self.transport.send_email(queued).await?.into())
            }
            EmailProcessingState::AwaitingResponses(awaiting) => {
                if self.deadlines.is_email_disclosure_deadline_met(awaiting.sent_emails.send_date) {
                    return Ok(EmailProcessingState::Finished(EmailPhaseFinished {
                        identifier: awaiting.identifier.clone(),
                        completed_reason: EmailPhaseFinishedReason::NinetyDaysPassed,
                        sent_emails: Some(awaiting.sent_emails.clone()),
                    }));
                }
                Ok(self.transport.check_for_email_responses(awaiting).await?.into())
            }
        }
    }
}
