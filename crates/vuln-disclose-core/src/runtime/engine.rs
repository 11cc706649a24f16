// crates/vuln-disclose-core/src/runtime/engine.rs
// ============================================================================
// Module: Vuln Disclose Engine
// Description: Top-level disclosure orchestration state machine.
// Purpose: Advance one disclosure case by one logical step per invocation,
// composing the email and issue sub-machines.
// Dependencies: crate::{core, interfaces, runtime}, tokio
// ============================================================================

//! ## Overview
//! The engine is the single canonical processing path for a disclosure case.
//! An external driver loads a persisted [`DisclosureProcessingStep`], calls
//! [`DisclosureEngine::process_state_transition`] once, persists the returned
//! step, and reschedules. Each call either fills in missing sub-state,
//! advances both sub-machines concurrently, or returns the step unchanged;
//! reprocessing an unchanged step is a fixed point.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::DisclosureId;
use crate::core::DisclosureProcessingStep;
use crate::core::DisclosureState;
use crate::core::EmailPhaseFinished;
use crate::core::EmailPhaseFinishedReason;
use crate::core::EmailProcessingState;
use crate::core::EmailSendQueued;
use crate::core::IssueNeeded;
use crate::core::IssueProcessingState;
use crate::core::Repository;
use crate::core::timeline::Clock;
use crate::interfaces::EmailSource;
use crate::interfaces::EmailSourceError;
use crate::interfaces::EmailTransport;
use crate::interfaces::EmailTransportError;
use crate::interfaces::IssueTransport;
use crate::interfaces::IssueTransportError;
use crate::interfaces::PmpvrChannel;
use crate::interfaces::PmpvrError;
use crate::runtime::email::EmailStateMachine;
use crate::runtime::issue::IssueStateMachine;
use crate::runtime::telemetry::DisclosureTelemetry;

// ============================================================================
// SECTION: Engine Errors
// ============================================================================

/// Errors surfaced by the disclosure engine.
///
/// All variants wrap collaborator failures: the engine never raises for
/// logical non-progress.
#[derive(Debug, Error)]
pub enum DisclosureEngineError {
    /// Email-source lookup failed.
    #[error(transparent)]
    EmailSource(#[from] EmailSourceError),
    /// Email transport failed.
    #[error(transparent)]
    EmailTransport(#[from] EmailTransportError),
    /// Issue transport failed.
    #[error(transparent)]
    IssueTransport(#[from] IssueTransportError),
}

// ============================================================================
// SECTION: Disclosure Route
// ============================================================================

/// Contact flow selected for a repository before queueing a case.
///
/// # Invariants
/// - Variants are exhaustive for the supported contact flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureRoute {
    /// Disclose through the host's private vulnerability reporting channel.
    Pmpvr,
    /// Fall back to the email and issue contact flows.
    EmailAndIssue,
}

/// Selects the contact flow for `repository`: PMPVR when a channel exists and
/// the repository supports it, the email/issue flows otherwise.
///
/// # Errors
///
/// Returns [`PmpvrError`] when the channel fails to answer.
pub async fn select_disclosure_route(
    pmpvr: Option<&dyn PmpvrChannel>,
    repository: &Repository,
) -> Result<DisclosureRoute, PmpvrError> {
    let Some(channel) = pmpvr else {
        return Ok(DisclosureRoute::EmailAndIssue);
    };
    if channel.repository_supports_pmpvr(repository).await? {
        Ok(DisclosureRoute::Pmpvr)
    } else {
        Ok(DisclosureRoute::EmailAndIssue)
    }
}

// ============================================================================
// SECTION: Disclosure Engine
// ============================================================================

/// Top-level orchestration state machine for disclosure cases.
pub struct DisclosureEngine<S, ET, IT, C, Obs> {
    /// Email-source lookup collaborator.
    email_source: S,
    /// Email-contact sub-machine.
    email_machine: EmailStateMachine<ET, C>,
    /// Issue-tracking sub-machine.
    issue_machine: IssueStateMachine<IT, C>,
    /// Optional escalation observer.
    telemetry: Option<Obs>,
}

impl<S, ET, IT, C, Obs> DisclosureEngine<S, ET, IT, C, Obs>
where
    S: EmailSource,
    ET: EmailTransport,
    IT: IssueTransport,
    C: Clock,
    Obs: DisclosureTelemetry,
{
    /// Creates a new disclosure engine.
    #[must_use]
    pub const fn new(
        email_source: S,
        email_machine: EmailStateMachine<ET, C>,
        issue_machine: IssueStateMachine<IT, C>,
        telemetry: Option<Obs>,
    ) -> Self {
        Self {
            email_source,
            email_machine,
            issue_machine,
            telemetry,
        }
    }

    /// Advances `step` by one logical step.
    ///
    /// Completed steps are returned unchanged. Missing sub-state is filled in
    /// and returned without running the sub-machines, so the driver persists
    /// every intermediate state exactly once. Otherwise both sub-machines
    /// advance concurrently and the escalation rules run on the merged
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`DisclosureEngineError`] when a collaborator fails. The
    /// engine performs no retries; the caller owns reschedule cadence.
    pub async fn process_state_transition(
        &self,
        step: &DisclosureProcessingStep,
    ) -> Result<DisclosureProcessingStep, DisclosureEngineError> {
        if step.is_complete() {
            return Ok(step.clone());
        }

        let email_state = match &step.email_processing_state {
            Some(state) => state.clone(),
            None => self.initial_email_state(step).await?,
        };
        let issue_state = match &step.issue_processing_state {
            Some(state) => state.clone(),
            None => IssueProcessingState::Needed(IssueNeeded {
                identifier: step.identifier.clone(),
                repository: step.repository.clone(),
            }),
        };

        let initialized = DisclosureProcessingStep {
            issue_processing_state: Some(issue_state.clone()),
            email_processing_state: Some(email_state.clone()),
            ..step.clone()
        };
        if initialized != *step {
            // Sub-state was filled in: one logical advance, persist first.
            return Ok(initialized);
        }

        // Independent advances, joined. Neither machine reads the other's
        // sub-state.
        let (email_next, issue_next) = tokio::join!(
            self.email_machine.process_state_transition(&email_state),
            self.issue_machine.process_state_transition(&issue_state),
        );
        let email_next = email_next?;
        let issue_next = issue_next?;

        let mut next = DisclosureProcessingStep {
            issue_processing_state: Some(issue_next.clone()),
            email_processing_state: Some(email_next.clone()),
            ..step.clone()
        };

        // Escalation: the case leaves the queued state as soon as either
        // side has moved off its just-queued starting point.
        let both_still_queued = matches!(email_next, EmailProcessingState::SendQueued(_))
            && matches!(issue_next, IssueProcessingState::Needed(_));
        if next.disclosure_state == DisclosureState::DisclosureQueued && !both_still_queued {
            self.record_escalation(
                &next.identifier,
                next.disclosure_state,
                DisclosureState::AwaitingPmpvrEnable,
            );
            next.disclosure_state = DisclosureState::AwaitingPmpvrEnable;
            return Ok(next);
        }

        // Escalation: both phases finished while awaiting PMPVR enablement
        // means disclosure proceeds through a public pull request.
        let both_phases_finished = matches!(email_next, EmailProcessingState::Finished(_))
            && matches!(issue_next, IssueProcessingState::Finished(_));
        if next.disclosure_state == DisclosureState::AwaitingPmpvrEnable && both_phases_finished {
            self.record_escalation(
                &next.identifier,
                next.disclosure_state,
                DisclosureState::DiscloseViaPublicPullRequest,
            );
            next.disclosure_state = DisclosureState::DiscloseViaPublicPullRequest;
        }
        Ok(next)
    }

    /// Resolves the initial email sub-state for a step that has none.
    async fn initial_email_state(
        &self,
        step: &DisclosureProcessingStep,
    ) -> Result<EmailProcessingState, DisclosureEngineError> {
        let emails = self
            .email_source
            .find_disclosure_emails_for_repository(&step.repository)
            .await?;
        if emails.is_empty() {
            return Ok(EmailProcessingState::Finished(EmailPhaseFinished {
                identifier: step.identifier.clone(),
                completed_reason: EmailPhaseFinishedReason::NoDisclosureEmailFound,
                sent_emails: None,
            }));
        }
        Ok(EmailProcessingState::SendQueued(EmailSendQueued {
            identifier: step.identifier.clone(),
            emails,
        }))
    }

    /// Reports an escalation to the configured observer, if any.
    fn record_escalation(
        &self,
        identifier: &DisclosureId,
        from: DisclosureState,
        to: DisclosureState,
    ) {
        if let Some(telemetry) = &self.telemetry {
            telemetry.disclosure_state_changed(identifier, from, to);
        }
    }
}
