// crates/vuln-disclose-core/tests/disclosure_engine_unit.rs
// ============================================================================
// Module: Disclosure Engine Unit Tests
// Description: Lazy initialization, escalation rules, fixed points, and
// error propagation.
// Purpose: Validate top-level orchestration of one disclosure case.
// ============================================================================

//! Disclosure engine tests covering the full case lifecycle.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;
use vuln_disclose_core::AwaitingEmailResponses;
use vuln_disclose_core::AwaitingIssue;
use vuln_disclose_core::CampaignId;
use vuln_disclose_core::Clock;
use vuln_disclose_core::DisclosureDeadlines;
use vuln_disclose_core::DisclosureEngine;
use vuln_disclose_core::DisclosureEngineError;
use vuln_disclose_core::DisclosureId;
use vuln_disclose_core::DisclosureProcessingStep;
use vuln_disclose_core::DisclosureRoute;
use vuln_disclose_core::DisclosureState;
use vuln_disclose_core::DisclosureTelemetry;
use vuln_disclose_core::EmailPhaseFinished;
use vuln_disclose_core::EmailPhaseFinishedReason;
use vuln_disclose_core::EmailProcessingState;
use vuln_disclose_core::EmailResponseOutcome;
use vuln_disclose_core::EmailSendOutcome;
use vuln_disclose_core::EmailSendQueued;
use vuln_disclose_core::EmailSource;
use vuln_disclose_core::EmailSourceError;
use vuln_disclose_core::EmailStateMachine;
use vuln_disclose_core::EmailTransport;
use vuln_disclose_core::EmailTransportError;
use vuln_disclose_core::Issue;
use vuln_disclose_core::IssueNeeded;
use vuln_disclose_core::IssuePhaseFinishedReason;
use vuln_disclose_core::IssueProcessingState;
use vuln_disclose_core::IssueStateMachine;
use vuln_disclose_core::IssueTransport;
use vuln_disclose_core::IssueTransportError;
use vuln_disclose_core::IssueUpdateOutcome;
use vuln_disclose_core::NoopTelemetry;
use vuln_disclose_core::PmpvrChannel;
use vuln_disclose_core::PmpvrError;
use vuln_disclose_core::Repository;
use vuln_disclose_core::SentEmails;
use vuln_disclose_core::select_disclosure_route;

const EXAMPLE_EMAIL_ADDRESS: &str = "example@example.com";
const SEND_DATE: OffsetDateTime = datetime!(2021-01-04 09:00 UTC);

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

fn repository() -> Repository {
    Repository::new("github.com", "test-owner", "test-name").expect("repository")
}

fn initial_step() -> DisclosureProcessingStep {
    DisclosureProcessingStep::minimal_initial(
        DisclosureId::new("test-identifier"),
        CampaignId::new("test-campaign-identifier"),
        repository(),
    )
}

fn engine<S, ET, IT, C>(
    email_source: S,
    email_transport: ET,
    issue_transport: IT,
    deadlines: DisclosureDeadlines<C>,
) -> DisclosureEngine<S, ET, IT, C, NoopTelemetry>
where
    S: EmailSource,
    ET: EmailTransport,
    IT: IssueTransport,
    C: Clock + Clone,
{
    DisclosureEngine::new(
        email_source,
        EmailStateMachine::new(email_transport, deadlines.clone()),
        IssueStateMachine::new(issue_transport, deadlines),
        None,
    )
}

fn assert_well_formed(initial: &DisclosureProcessingStep, processed: &DisclosureProcessingStep) {
    assert_eq!(processed.identifier, initial.identifier);
    assert_eq!(processed.campaign_identifier, initial.campaign_identifier);
    assert_eq!(processed.repository, initial.repository);
    if let Some(issue_state) = &processed.issue_processing_state {
        assert_eq!(issue_state.identifier(), &initial.identifier);
        assert_eq!(issue_state.repository(), &initial.repository);
    }
    if let Some(email_state) = &processed.email_processing_state {
        assert_eq!(email_state.identifier(), &initial.identifier);
    }
}

/// Email source answering with a fixed address list.
struct FixedEmailSource {
    emails: Vec<String>,
}

#[async_trait]
impl EmailSource for FixedEmailSource {
    async fn find_disclosure_emails_for_repository(
        &self,
        _repository: &Repository,
    ) -> Result<Vec<String>, EmailSourceError> {
        Ok(self.emails.clone())
    }
}

/// Email source that fails the test if it is reached.
struct UnusedEmailSource;

#[async_trait]
impl EmailSource for UnusedEmailSource {
    async fn find_disclosure_emails_for_repository(
        &self,
        _repository: &Repository,
    ) -> Result<Vec<String>, EmailSourceError> {
        Err(EmailSourceError::Lookup(
            "find_disclosure_emails_for_repository called unexpectedly".to_string(),
        ))
    }
}

/// Transport that fails the test if any method is reached.
struct UnusedEmailTransport;

#[async_trait]
impl EmailTransport for UnusedEmailTransport {
    async fn send_email(
        &self,
        _queued: &EmailSendQueued,
    ) -> Result<EmailSendOutcome, EmailTransportError> {
        Err(EmailTransportError::Transport("send_email called unexpectedly".to_string()))
    }

    async fn check_for_email_responses(
        &self,
        _awaiting: &AwaitingEmailResponses,
    ) -> Result<EmailResponseOutcome, EmailTransportError> {
        Err(EmailTransportError::Transport(
            "check_for_email_responses called unexpectedly".to_string(),
        ))
    }
}

/// Transport whose sends go through and whose inbox stays quiet.
struct HappyPathEmailTransport;

#[async_trait]
impl EmailTransport for HappyPathEmailTransport {
    async fn send_email(
        &self,
        queued: &EmailSendQueued,
    ) -> Result<EmailSendOutcome, EmailTransportError> {
        Ok(EmailSendOutcome::Sent(AwaitingEmailResponses {
            identifier: queued.identifier.clone(),
            emails_bounced: Vec::new(),
            sent_emails: SentEmails {
                send_date: SEND_DATE,
                emails_sent: queued.emails.clone(),
            },
        }))
    }

    async fn check_for_email_responses(
        &self,
        awaiting: &AwaitingEmailResponses,
    ) -> Result<EmailResponseOutcome, EmailTransportError> {
        Ok(EmailResponseOutcome::NoNewResponses(awaiting.clone()))
    }
}

/// Transport whose sends never go through.
struct RequeueingEmailTransport;

#[async_trait]
impl EmailTransport for RequeueingEmailTransport {
    async fn send_email(
        &self,
        queued: &EmailSendQueued,
    ) -> Result<EmailSendOutcome, EmailTransportError> {
        Ok(EmailSendOutcome::Requeued(queued.clone()))
    }

    async fn check_for_email_responses(
        &self,
        awaiting: &AwaitingEmailResponses,
    ) -> Result<EmailResponseOutcome, EmailTransportError> {
        Ok(EmailResponseOutcome::NoNewResponses(awaiting.clone()))
    }
}

/// Transport that fails the test if any method is reached.
struct UnusedIssueTransport;

#[async_trait]
impl IssueTransport for UnusedIssueTransport {
    async fn create_issue(
        &self,
        _needed: &IssueNeeded,
    ) -> Result<IssueProcessingState, IssueTransportError> {
        Err(IssueTransportError::Transport("create_issue called unexpectedly".to_string()))
    }

    async fn check_for_update(
        &self,
        _awaiting: &AwaitingIssue,
    ) -> Result<IssueUpdateOutcome, IssueTransportError> {
        Err(IssueTransportError::Transport("check_for_update called unexpectedly".to_string()))
    }
}

/// Transport that creates the tracking issue and then stays quiet.
struct HappyPathIssueTransport;

#[async_trait]
impl IssueTransport for HappyPathIssueTransport {
    async fn create_issue(
        &self,
        needed: &IssueNeeded,
    ) -> Result<IssueProcessingState, IssueTransportError> {
        Ok(IssueProcessingState::Awaiting(AwaitingIssue {
            identifier: needed.identifier.clone(),
            repository: needed.repository.clone(),
            issue: Issue {
                creation_date: SEND_DATE,
                issue_identifier: "42".to_string(),
                issue_url: format!("{}/issues/42", needed.repository.as_url()),
            },
        }))
    }

    async fn check_for_update(
        &self,
        awaiting: &AwaitingIssue,
    ) -> Result<IssueUpdateOutcome, IssueTransportError> {
        Ok(IssueUpdateOutcome::StillOpen(awaiting.clone()))
    }
}

/// Transport whose issue creation never goes through.
struct DecliningIssueTransport;

#[async_trait]
impl IssueTransport for DecliningIssueTransport {
    async fn create_issue(
        &self,
        needed: &IssueNeeded,
    ) -> Result<IssueProcessingState, IssueTransportError> {
        Ok(IssueProcessingState::Needed(needed.clone()))
    }

    async fn check_for_update(
        &self,
        awaiting: &AwaitingIssue,
    ) -> Result<IssueUpdateOutcome, IssueTransportError> {
        Ok(IssueUpdateOutcome::StillOpen(awaiting.clone()))
    }
}

/// Telemetry double collecting escalation events.
#[derive(Clone, Default)]
struct RecordingTelemetry {
    events: Arc<Mutex<Vec<(DisclosureState, DisclosureState)>>>,
}

impl DisclosureTelemetry for RecordingTelemetry {
    fn disclosure_state_changed(
        &self,
        _identifier: &DisclosureId,
        from: DisclosureState,
        to: DisclosureState,
    ) {
        self.events.lock().unwrap().push((from, to));
    }
}

/// PMPVR channel with a fixed answer.
struct StaticPmpvrChannel {
    supported: bool,
}

#[async_trait]
impl PmpvrChannel for StaticPmpvrChannel {
    async fn repository_supports_pmpvr(
        &self,
        _repository: &Repository,
    ) -> Result<bool, PmpvrError> {
        Ok(self.supported)
    }
}

/// PMPVR channel that always fails.
struct ErroringPmpvrChannel;

#[async_trait]
impl PmpvrChannel for ErroringPmpvrChannel {
    async fn repository_supports_pmpvr(
        &self,
        _repository: &Repository,
    ) -> Result<bool, PmpvrError> {
        Err(PmpvrError::Channel("channel unavailable".to_string()))
    }
}

/// Runs the lazy-initialization call against a fixed lookup result.
async fn initialized_step(emails: Vec<String>) -> DisclosureProcessingStep {
    let init_engine = engine(
        FixedEmailSource {
            emails,
        },
        UnusedEmailTransport,
        UnusedIssueTransport,
        DisclosureDeadlines::live(),
    );
    init_engine.process_state_transition(&initial_step()).await.expect("initialize step")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn minimal_step_gets_sub_states_filled_in_without_advancing() {
    let initial = initial_step();
    let processed = initialized_step(vec![EXAMPLE_EMAIL_ADDRESS.to_string()]).await;

    assert_well_formed(&initial, &processed);
    assert_eq!(
        processed.email_processing_state,
        Some(EmailProcessingState::SendQueued(EmailSendQueued {
            identifier: initial.identifier.clone(),
            emails: vec![EXAMPLE_EMAIL_ADDRESS.to_string()],
        }))
    );
    assert_eq!(
        processed.issue_processing_state,
        Some(IssueProcessingState::Needed(IssueNeeded {
            identifier: initial.identifier.clone(),
            repository: initial.repository.clone(),
        }))
    );
    // Escalation happens on the next call, not the initializing one.
    assert_eq!(processed.disclosure_state, DisclosureState::DisclosureQueued);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_lookup_finishes_the_email_phase_at_initialization() {
    let initial = initial_step();
    let processed = initialized_step(Vec::new()).await;

    assert_well_formed(&initial, &processed);
    assert_eq!(
        processed.email_processing_state,
        Some(EmailProcessingState::Finished(EmailPhaseFinished {
            identifier: initial.identifier.clone(),
            completed_reason: EmailPhaseFinishedReason::NoDisclosureEmailFound,
            sent_emails: None,
        }))
    );
    assert_eq!(
        processed.issue_processing_state,
        Some(IssueProcessingState::Needed(IssueNeeded {
            identifier: initial.identifier.clone(),
            repository: initial.repository.clone(),
        }))
    );
    assert_eq!(processed.disclosure_state, DisclosureState::DisclosureQueued);
}

#[tokio::test(flavor = "multi_thread")]
async fn happy_path_runs_to_public_pull_request_disclosure() {
    let initial = initial_step();
    let initialized = initialized_step(vec![EXAMPLE_EMAIL_ADDRESS.to_string()]).await;

    // Both transports succeed: send goes out, issue gets created.
    let working = engine(
        UnusedEmailSource,
        HappyPathEmailTransport,
        HappyPathIssueTransport,
        DisclosureDeadlines::fixed(SEND_DATE),
    );
    let processed = working.process_state_transition(&initialized).await.expect("advance step");
    assert_well_formed(&initial, &processed);
    assert!(matches!(
        processed.email_processing_state,
        Some(EmailProcessingState::AwaitingResponses(_))
    ));
    assert!(matches!(
        processed.issue_processing_state,
        Some(IssueProcessingState::Awaiting(_))
    ));
    assert_eq!(processed.disclosure_state, DisclosureState::AwaitingPmpvrEnable);

    // Reprocessing at the same instant is a fixed point.
    let reprocessed = working.process_state_transition(&processed).await.expect("reprocess step");
    assert_eq!(reprocessed, processed);

    // 95 days later (a weekday) both deadlines have passed; the transports
    // would fail the test if they were consulted.
    let later = engine(
        UnusedEmailSource,
        UnusedEmailTransport,
        UnusedIssueTransport,
        DisclosureDeadlines::fixed(SEND_DATE + Duration::days(95)),
    );
    let disclosed = later.process_state_transition(&reprocessed).await.expect("advance deadlines");
    assert_well_formed(&initial, &disclosed);
    assert_eq!(
        disclosed.email_processing_state,
        Some(EmailProcessingState::Finished(EmailPhaseFinished {
            identifier: initial.identifier.clone(),
            completed_reason: EmailPhaseFinishedReason::NinetyDaysPassed,
            sent_emails: Some(SentEmails {
                send_date: SEND_DATE,
                emails_sent: vec![EXAMPLE_EMAIL_ADDRESS.to_string()],
            }),
        }))
    );
    assert!(matches!(
        &disclosed.issue_processing_state,
        Some(IssueProcessingState::Finished(finished))
            if finished.completed_reason == IssuePhaseFinishedReason::ThirtyFiveDaysPassed
    ));
    assert_eq!(disclosed.disclosure_state, DisclosureState::DiscloseViaPublicPullRequest);

    // One further call is a fixed point.
    let settled = later.process_state_transition(&disclosed).await.expect("settle step");
    assert_eq!(settled, disclosed);
}

#[tokio::test(flavor = "multi_thread")]
async fn completed_steps_are_returned_unchanged() {
    let unused = engine(
        UnusedEmailSource,
        UnusedEmailTransport,
        UnusedIssueTransport,
        DisclosureDeadlines::live(),
    );
    for state in DisclosureState::COMPLETED_STATES {
        let step = DisclosureProcessingStep {
            disclosure_state: state,
            ..initial_step()
        };
        let processed =
            unused.process_state_transition(&step).await.expect("process completed step");
        assert_eq!(processed, step);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn escalates_as_soon_as_either_side_progresses() {
    // Email stays queued, issue creation succeeds: one side progressed, so
    // the case leaves the queued state.
    let initialized = initialized_step(vec![EXAMPLE_EMAIL_ADDRESS.to_string()]).await;
    let working = engine(
        UnusedEmailSource,
        RequeueingEmailTransport,
        HappyPathIssueTransport,
        DisclosureDeadlines::fixed(SEND_DATE),
    );
    let processed = working.process_state_transition(&initialized).await.expect("advance step");
    assert!(matches!(
        processed.email_processing_state,
        Some(EmailProcessingState::SendQueued(_))
    ));
    assert!(matches!(
        processed.issue_processing_state,
        Some(IssueProcessingState::Awaiting(_))
    ));
    assert_eq!(processed.disclosure_state, DisclosureState::AwaitingPmpvrEnable);
}

#[tokio::test(flavor = "multi_thread")]
async fn stays_queued_while_neither_side_progresses() {
    let initialized = initialized_step(vec![EXAMPLE_EMAIL_ADDRESS.to_string()]).await;
    let working = engine(
        UnusedEmailSource,
        RequeueingEmailTransport,
        DecliningIssueTransport,
        DisclosureDeadlines::fixed(SEND_DATE),
    );
    let processed = working.process_state_transition(&initialized).await.expect("advance step");
    assert_eq!(processed, initialized);
}

#[tokio::test(flavor = "multi_thread")]
async fn lookup_failure_propagates() {
    let broken = engine(
        UnusedEmailSource,
        UnusedEmailTransport,
        UnusedIssueTransport,
        DisclosureDeadlines::live(),
    );
    let result = broken.process_state_transition(&initial_step()).await;
    assert!(matches!(result, Err(DisclosureEngineError::EmailSource(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_propagates() {
    let initialized = initialized_step(vec![EXAMPLE_EMAIL_ADDRESS.to_string()]).await;
    let broken = engine(
        UnusedEmailSource,
        UnusedEmailTransport,
        HappyPathIssueTransport,
        DisclosureDeadlines::fixed(SEND_DATE),
    );
    let result = broken.process_state_transition(&initialized).await;
    assert!(matches!(result, Err(DisclosureEngineError::EmailTransport(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn telemetry_observes_each_escalation_once() {
    let telemetry = RecordingTelemetry::default();
    let working = DisclosureEngine::new(
        UnusedEmailSource,
        EmailStateMachine::new(HappyPathEmailTransport, DisclosureDeadlines::fixed(SEND_DATE)),
        IssueStateMachine::new(HappyPathIssueTransport, DisclosureDeadlines::fixed(SEND_DATE)),
        Some(telemetry.clone()),
    );
    let initialized = initialized_step(vec![EXAMPLE_EMAIL_ADDRESS.to_string()]).await;
    let processed = working.process_state_transition(&initialized).await.expect("advance step");
    let reprocessed = working.process_state_transition(&processed).await.expect("reprocess step");
    assert_eq!(reprocessed, processed);
    assert_eq!(
        *telemetry.events.lock().unwrap(),
        vec![(DisclosureState::DisclosureQueued, DisclosureState::AwaitingPmpvrEnable)]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn route_selection_prefers_pmpvr_when_supported() {
    let channel = StaticPmpvrChannel {
        supported: true,
    };
    let route = select_disclosure_route(Some(&channel), &repository()).await.expect("route");
    assert_eq!(route, DisclosureRoute::Pmpvr);
}

#[tokio::test(flavor = "multi_thread")]
async fn route_selection_falls_back_without_pmpvr_support() {
    let channel = StaticPmpvrChannel {
        supported: false,
    };
    let route = select_disclosure_route(Some(&channel), &repository()).await.expect("route");
    assert_eq!(route, DisclosureRoute::EmailAndIssue);

    let route = select_disclosure_route(None, &repository()).await.expect("route");
    assert_eq!(route, DisclosureRoute::EmailAndIssue);
}

#[tokio::test(flavor = "multi_thread")]
async fn route_selection_propagates_channel_failures() {
    let result = select_disclosure_route(Some(&ErroringPmpvrChannel), &repository()).await;
    assert!(matches!(result, Err(PmpvrError::Channel(_))));
}
