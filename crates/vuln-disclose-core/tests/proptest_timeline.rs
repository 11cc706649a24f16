// crates/vuln-disclose-core/tests/proptest_timeline.rs
// ============================================================================
// Module: Timeline Property-Based Tests
// Description: Property tests for deadline policy invariants.
// Purpose: Detect threshold and blackout violations across wide input ranges.
// ============================================================================

//! Property-based tests for deadline policy invariants.

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

use proptest::prelude::*;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;
use vuln_disclose_core::DisclosureDeadlines;
use vuln_disclose_core::EMAIL_DISCLOSURE_DEADLINE_DAYS;
use vuln_disclose_core::ISSUE_PMPVR_REQUEST_DEADLINE_DAYS;

const MONDAY: OffsetDateTime = datetime!(2020-01-06 12:00 UTC);
const SATURDAY: OffsetDateTime = datetime!(2020-01-04 12:00 UTC);

proptest! {
    #[test]
    fn weekday_deadlines_match_the_thresholds_exactly(elapsed_days in 0i64 .. 400) {
        let deadlines = DisclosureDeadlines::fixed(MONDAY);
        let contact_date = MONDAY - Duration::days(elapsed_days);
        prop_assert_eq!(
            deadlines.is_email_disclosure_deadline_met(contact_date),
            elapsed_days > EMAIL_DISCLOSURE_DEADLINE_DAYS
        );
        prop_assert_eq!(
            deadlines.is_issue_pmpvr_request_deadline_met(contact_date),
            elapsed_days > ISSUE_PMPVR_REQUEST_DEADLINE_DAYS
        );
    }

    #[test]
    fn weekend_deadlines_are_never_met(
        elapsed_days in 0i64 .. 400,
        weekend_day in 0i64 .. 2,
    ) {
        let now = SATURDAY + Duration::days(weekend_day);
        let deadlines = DisclosureDeadlines::fixed(now);
        let contact_date = now - Duration::days(elapsed_days);
        prop_assert!(!deadlines.is_email_disclosure_deadline_met(contact_date));
        prop_assert!(!deadlines.is_issue_pmpvr_request_deadline_met(contact_date));
    }

    #[test]
    fn met_deadlines_stay_met_as_time_passes(elapsed_days in 0i64 .. 399) {
        // On a fixed weekday, meeting a deadline is monotone in elapsed days.
        let contact_date = MONDAY - Duration::days(elapsed_days);
        let today = DisclosureDeadlines::fixed(MONDAY);
        let tomorrow = DisclosureDeadlines::fixed(MONDAY + Duration::days(1));
        if today.is_email_disclosure_deadline_met(contact_date) {
            prop_assert!(tomorrow.is_email_disclosure_deadline_met(contact_date));
        }
        if today.is_issue_pmpvr_request_deadline_met(contact_date) {
            prop_assert!(tomorrow.is_issue_pmpvr_request_deadline_met(contact_date));
        }
    }
}
