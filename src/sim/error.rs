//! Simulation error kinds

use std::collections::TryReserveError;

use thiserror::Error;

use crate::SettingsError;

/// Failures while building a world. Every per-tick operation is total.
#[derive(Debug, Error)]
pub enum SimError {
    /// Fixed-capacity entity storage could not be reserved
    #[error("failed to reserve entity storage: {0}")]
    Allocation(#[from] TryReserveError),
    /// Settings failed validation
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
}
