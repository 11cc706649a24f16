// crates/vuln-disclose-core/src/core/email.rs
// ============================================================================
// Module: Vuln Disclose Email Processing States
// Description: Email-contact sub-states for a disclosure case.
// Purpose: Capture the email phase of a disclosure as a closed, serializable
// state family.
// Dependencies: crate::core::identifiers, serde, time
// ============================================================================

//! ## Overview
//! The email-contact phase of a disclosure case is modeled as a closed sum
//! type: queued, awaiting responses, or one of three end states. Every record
//! carries the parent case identifier so persisted sub-states can be checked
//! against their step. Timestamps always carry an offset and serialize as
//! RFC 3339.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::identifiers::DisclosureId;

// ============================================================================
// SECTION: Sent Email Snapshot
// ============================================================================

/// Immutable snapshot of a completed notification send.
///
/// # Invariants
/// - `send_date` carries an explicit offset; offset-less RFC 3339 strings are
///   rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmails {
    /// Timestamp the notification emails were sent.
    #[serde(with = "time::serde::rfc3339")]
    pub send_date: OffsetDateTime,
    /// Addresses the notification was sent to.
    pub emails_sent: Vec<String>,
}

// ============================================================================
// SECTION: Email Phase Records
// ============================================================================

/// Notification emails are queued but have not been sent yet.
///
/// # Invariants
/// - `identifier` equals the parent step's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSendQueued {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Addresses queued for notification, in lookup order.
    pub emails: Vec<String>,
}

/// Notification emails were sent; maintainer responses are awaited.
///
/// # Invariants
/// - `identifier` equals the parent step's identifier.
/// - `emails_bounced` is a subset of `sent_emails.emails_sent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingEmailResponses {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Addresses that bounced after the send.
    pub emails_bounced: Vec<String>,
    /// Snapshot of the completed send.
    pub sent_emails: SentEmails,
}

/// A maintainer replied that the proposed fix is invalid.
///
/// # Invariants
/// - `identifier` equals the parent step's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResponseFixInvalid {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Maintainer-provided reason.
    pub reason: String,
    /// Snapshot of the completed send.
    pub sent_emails: SentEmails,
}

/// A maintainer replied that the report is not a vulnerability.
///
/// # Invariants
/// - `identifier` equals the parent step's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResponseNotAVulnerability {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Maintainer-provided reason.
    pub reason: String,
    /// Snapshot of the completed send.
    pub sent_emails: SentEmails,
}

/// Reason the email phase finished without a substantive maintainer response.
///
/// # Invariants
/// - Variants are stable for serialization and persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailPhaseFinishedReason {
    /// The 90-day disclosure deadline elapsed.
    NinetyDaysPassed,
    /// Every address in the send bounced.
    AllEmailsBounced,
    /// Only an automated "please fill out our form" response arrived.
    AutomatedPleaseFillFormResponse,
    /// No disclosure address could be found for the repository.
    NoDisclosureEmailFound,
}

/// The email phase is over; no further email processing occurs.
///
/// # Invariants
/// - `identifier` equals the parent step's identifier.
/// - `sent_emails` is `None` only when no send ever happened
///   ([`EmailPhaseFinishedReason::NoDisclosureEmailFound`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPhaseFinished {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Why the phase finished.
    pub completed_reason: EmailPhaseFinishedReason,
    /// Snapshot of the completed send, when one happened.
    pub sent_emails: Option<SentEmails>,
}

// ============================================================================
// SECTION: Email Processing State
// ============================================================================

/// Email-contact sub-state of a disclosure case.
///
/// # Invariants
/// - Variants are stable for serialization and persisted state.
/// - [`EmailProcessingState::FixInvalid`], [`EmailProcessingState::NotAVulnerability`],
///   and [`EmailProcessingState::Finished`] are end states: processing returns
///   them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum EmailProcessingState {
    /// Emails queued, not yet sent.
    SendQueued(EmailSendQueued),
    /// Emails sent, responses awaited.
    AwaitingResponses(AwaitingEmailResponses),
    /// End state: a maintainer called the fix invalid.
    FixInvalid(EmailResponseFixInvalid),
    /// End state: a maintainer disputed the vulnerability.
    NotAVulnerability(EmailResponseNotAVulnerability),
    /// End state: the phase finished without a substantive response.
    Finished(EmailPhaseFinished),
}

impl EmailProcessingState {
    /// Returns the parent case identifier carried by this sub-state.
    #[must_use]
    pub const fn identifier(&self) -> &DisclosureId {
        match self {
            Self::SendQueued(record) => &record.identifier,
            Self::AwaitingResponses(record) => &record.identifier,
            Self::FixInvalid(record) => &record.identifier,
            Self::NotAVulnerability(record) => &record.identifier,
            Self::Finished(record) => &record.identifier,
        }
    }

    /// Returns true when no further email processing will occur.
    #[must_use]
    pub const fn is_end_state(&self) -> bool {
        matches!(self, Self::FixInvalid(_) | Self::NotAVulnerability(_) | Self::Finished(_))
    }
}
