// crates/vuln-disclose-core/src/runtime/telemetry.rs
// ============================================================================
// Module: Vuln Disclose Telemetry
// Description: Observability hooks for disclosure state changes.
// Purpose: Provide escalation events without hard observability deps.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! This module exposes a thin observer interface for top-level disclosure
//! state changes. It is intentionally dependency-light so deployments can
//! plug in their logging or metrics stack without the core taking a
//! dependency on either.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DisclosureId;
use crate::core::DisclosureState;

// ============================================================================
// SECTION: Telemetry Interface
// ============================================================================

/// Observer for disclosure state escalations.
pub trait DisclosureTelemetry: Send + Sync {
    /// Called when the engine escalates a case's top-level state.
    fn disclosure_state_changed(
        &self,
        identifier: &DisclosureId,
        from: DisclosureState,
        to: DisclosureState,
    );
}

/// No-op telemetry for deployments without an observability stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl DisclosureTelemetry for NoopTelemetry {
    fn disclosure_state_changed(
        &self,
        _identifier: &DisclosureId,
        _from: DisclosureState,
        _to: DisclosureState,
    ) {
    }
}
