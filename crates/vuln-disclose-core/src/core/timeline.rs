// crates/vuln-disclose-core/src/core/timeline.rs
// ============================================================================
// Module: Vuln Disclose Timeline
// Description: Disclosure deadline policy with an injected clock.
// Purpose: Decide whether time-based deadlines have elapsed, deterministically
// under test and live in production.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Deadline checks are pure functions of an injected "now" and a contact
//! timestamp. Production uses [`SystemClock`], which reads the wall clock
//! fresh on every call so long-running processes stay correct across day
//! boundaries; tests inject [`FixedClock`] or their own [`Clock`] for
//! deterministic behavior.
//!
//! No disclosure action is taken on weekends: when "now" falls on a Saturday
//! or Sunday in UTC, every deadline check reports not-met regardless of
//! elapsed time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::UtcOffset;
use time::Weekday;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Whole days after the email send date at which email-based private
/// disclosure converts to public disclosure. Strictly-greater comparison:
/// exactly this many elapsed days does not meet the deadline.
pub const EMAIL_DISCLOSURE_DEADLINE_DAYS: i64 = 90;

/// Whole days after issue creation at which issue-based private contact is
/// considered exhausted. Strictly-greater comparison, as above.
pub const ISSUE_PMPVR_REQUEST_DEADLINE_DAYS: i64 = 35;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Source of the reference "now" for deadline checks.
pub trait Clock: Send + Sync {
    /// Returns the current instant. Implementations may return any offset;
    /// deadline checks normalize to UTC.
    fn now(&self) -> OffsetDateTime;
}

/// Production clock reading the wall clock fresh on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a supplied instant, for deterministic tests.
///
/// Not suitable for production use: a process running across day boundaries
/// would keep evaluating deadlines against the construction-time instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// The frozen instant.
    now: OffsetDateTime,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self {
            now,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
    }
}

// ============================================================================
// SECTION: Deadline Policy
// ============================================================================

/// Disclosure deadline policy shared by the email and issue state machines.
#[derive(Debug, Clone)]
pub struct DisclosureDeadlines<C> {
    /// Injected reference-time source.
    clock: C,
}

impl DisclosureDeadlines<SystemClock> {
    /// Creates the production policy backed by the wall clock.
    #[must_use]
    pub const fn live() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl DisclosureDeadlines<FixedClock> {
    /// Creates a policy frozen at `now`, for deterministic tests.
    #[must_use]
    pub const fn fixed(now: OffsetDateTime) -> Self {
        Self::with_clock(FixedClock::new(now))
    }
}

impl<C> DisclosureDeadlines<C>
where
    C: Clock,
{
    /// Creates a policy backed by the supplied clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
        }
    }

    /// Returns true when email-based private disclosure should convert to
    /// public disclosure: strictly more than
    /// [`EMAIL_DISCLOSURE_DEADLINE_DAYS`] whole days have elapsed since
    /// `contact_date`, and "now" is a weekday in UTC.
    #[must_use]
    pub fn is_email_disclosure_deadline_met(&self, contact_date: OffsetDateTime) -> bool {
        self.is_deadline_met(contact_date, EMAIL_DISCLOSURE_DEADLINE_DAYS)
    }

    /// Returns true when issue-based private contact is exhausted: strictly
    /// more than [`ISSUE_PMPVR_REQUEST_DEADLINE_DAYS`] whole days have
    /// elapsed since `contact_date`, and "now" is a weekday in UTC.
    #[must_use]
    pub fn is_issue_pmpvr_request_deadline_met(&self, contact_date: OffsetDateTime) -> bool {
        self.is_deadline_met(contact_date, ISSUE_PMPVR_REQUEST_DEADLINE_DAYS)
    }

    /// Shared deadline rule: weekend blackout, then whole-day truncation with
    /// a strictly-greater threshold comparison.
    fn is_deadline_met(&self, contact_date: OffsetDateTime, threshold_days: i64) -> bool {
        let now = self.clock.now().to_offset(UtcOffset::UTC);
        if matches!(now.weekday(), Weekday::Saturday | Weekday::Sunday) {
            return false;
        }
        (now - contact_date).whole_days() > threshold_days
    }
}
