// crates/vuln-disclose-core/src/runtime/mod.rs
// ============================================================================
// Module: Vuln Disclose Runtime
// Description: State machines advancing disclosure cases.
// Purpose: Execute disclosure processing against transport collaborators.
// Dependencies: crate::{core, interfaces}, tokio
// ============================================================================

//! ## Overview
//! Runtime modules implement the three cooperating state machines: the email
//! and issue sub-machines and the top-level disclosure engine that composes
//! them. All processing paths go through the same engine logic so state
//! advancement stays idempotent regardless of how the driver schedules it.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod email;
pub mod engine;
pub mod issue;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use email::EmailStateMachine;
pub use engine::DisclosureEngine;
pub use engine::DisclosureEngineError;
pub use engine::DisclosureRoute;
pub use engine::select_disclosure_route;
pub use issue::IssueStateMachine;
pub use telemetry::DisclosureTelemetry;
pub use telemetry::NoopTelemetry;
