// crates/vuln-disclose-core/src/lib.rs
// ============================================================================
// Module: Vuln Disclose Core Library
// Description: Public API surface for the Vuln Disclose core.
// Purpose: Expose core types, interfaces, and runtime state machines.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Vuln Disclose core provides the disclosure orchestration logic for
//! automated coordinated vulnerability disclosure: a deadline policy and
//! three cooperating state machines that advance one disclosure case per
//! invocation. It is transport-agnostic and integrates through explicit
//! interfaces; persistence and scheduling belong to the external driver.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::EmailEndState;
pub use interfaces::EmailResponseOutcome;
pub use interfaces::EmailSendOutcome;
pub use interfaces::EmailSource;
pub use interfaces::EmailSourceError;
pub use interfaces::EmailTransport;
pub use interfaces::EmailTransportError;
pub use interfaces::IssueTransport;
pub use interfaces::IssueTransportError;
pub use interfaces::IssueUpdateOutcome;
pub use interfaces::PmpvrChannel;
pub use interfaces::PmpvrError;
pub use runtime::DisclosureEngine;
pub use runtime::DisclosureEngineError;
pub use runtime::DisclosureRoute;
pub use runtime::DisclosureTelemetry;
pub use runtime::EmailStateMachine;
pub use runtime::IssueStateMachine;
pub use runtime::NoopTelemetry;
pub use runtime::select_disclosure_route;
