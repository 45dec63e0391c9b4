//! Boost-limiter patch guard
//!
//! A failed self-test or a failed toggle latches an error for the rest of the
//! session. While latched, no further patch calls reach the collaborator.

use crate::error::PatchError;
use crate::host::BoostLimiterPatch;
use tracing::{error, info};

#[derive(Debug, Clone, Default)]
pub struct PatchGuard {
    error: bool,
    reported: bool,
}

impl PatchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the collaborator's self-test and latches the error on failure.
    pub fn probe(&mut self, patch: &mut dyn BoostLimiterPatch) -> Result<(), PatchError> {
        if patch.test() {
            info!("Boost limiter patch site found");
            return Ok(());
        }
        error!("Boost limiter patch self-test failed, patching disabled");
        self.error = true;
        self.reported = true;
        Err(PatchError::TestFailed)
    }

    /// Brings the patch into the wanted state.
    ///
    /// Returns `Ok(true)` when the collaborator was toggled and `Ok(false)`
    /// when it already was in the wanted state.
    pub fn set_engaged(
        &mut self,
        patch: &mut dyn BoostLimiterPatch,
        engaged: bool,
    ) -> Result<bool, PatchError> {
        if self.error {
            if !self.reported {
                error!("Boost limiter patch disabled after an earlier failure");
                self.reported = true;
            }
            return Err(PatchError::Disabled);
        }

        if patch.is_applied() == engaged {
            return Ok(false);
        }

        let (ok, failure) = if engaged {
            (patch.apply(), PatchError::ApplyFailed)
        } else {
            (patch.restore(), PatchError::RestoreFailed)
        };

        if !ok {
            error!(engaged, "Boost limiter patch toggle failed");
            self.error = true;
            self.reported = true;
            return Err(failure);
        }

        info!(engaged, "Boost limiter patch toggled");
        Ok(true)
    }

    pub fn has_error(&self) -> bool {
        self.error
    }
}
