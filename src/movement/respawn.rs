//! Movement domain: tick-driven respawn sequencing.
//!
//! A respawn hides the body for a fixed delay, puts it back at the spawn
//! point, then blinks it a fixed number of times. Each sequence carries the
//! generation it was started under; the motor drops any sequence whose
//! generation is no longer current, so two blink loops never interleave.

use serde::Serialize;

use crate::movement::MovementTuning;

/// Tick counts for one respawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RespawnTiming {
    pub delay_ticks: u32,
    pub blink_interval_ticks: u32,
    pub blink_toggles: u32,
    pub control_return_toggle: u32,
}

impl From<&MovementTuning> for RespawnTiming {
    fn from(tuning: &MovementTuning) -> Self {
        Self {
            delay_ticks: tuning.respawn_delay_ticks,
            blink_interval_ticks: tuning.blink_interval_ticks,
            blink_toggles: tuning.blink_toggles,
            control_return_toggle: tuning.control_return_toggle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RespawnStage {
    /// Body hidden and frozen while the delay runs down.
    Hidden { remaining_ticks: u32 },
    /// Body back in play, visibility toggling.
    Blinking { toggles_done: u32, wait_ticks: u32 },
    Finished,
}

/// What the owner must apply after advancing a sequence by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RespawnStep {
    /// Restore velocity, gravity and position from the spawn point.
    pub reset_body: bool,
    pub toggle_visibility: bool,
    pub enable_control: bool,
    /// Sequence complete; the body must end visible.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RespawnSequence {
    generation: u64,
    timing: RespawnTiming,
    stage: RespawnStage,
}

impl RespawnSequence {
    pub fn new(generation: u64, timing: RespawnTiming) -> Self {
        Self {
            generation,
            timing,
            stage: RespawnStage::Hidden {
                remaining_ticks: timing.delay_ticks,
            },
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stage(&self) -> RespawnStage {
        self.stage
    }

    #[cfg(test)]
    pub fn is_hidden(&self) -> bool {
        matches!(self.stage, RespawnStage::Hidden { .. })
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.stage == RespawnStage::Finished
    }

    /// Visibility toggles applied so far.
    pub fn toggles_done(&self) -> u32 {
        match self.stage {
            RespawnStage::Hidden { .. } => 0,
            RespawnStage::Blinking { toggles_done, .. } => toggles_done,
            RespawnStage::Finished => self.timing.blink_toggles,
        }
    }

    /// Advances one tick.
    pub fn advance(&mut self) -> RespawnStep {
        let mut step = RespawnStep::default();

        match self.stage {
            RespawnStage::Hidden { remaining_ticks } if remaining_ticks > 1 => {
                self.stage = RespawnStage::Hidden {
                    remaining_ticks: remaining_ticks - 1,
                };
            }
            RespawnStage::Hidden { .. } => {
                step.reset_body = true;
                self.stage = RespawnStage::Blinking {
                    toggles_done: 0,
                    wait_ticks: 0,
                };
                self.blink(&mut step);
            }
            RespawnStage::Blinking { .. } => self.blink(&mut step),
            RespawnStage::Finished => {}
        }

        step
    }

    fn blink(&mut self, step: &mut RespawnStep) {
        let RespawnStage::Blinking {
            mut toggles_done,
            mut wait_ticks,
        } = self.stage
        else {
            return;
        };

        if wait_ticks > 0 {
            wait_ticks -= 1;
            if wait_ticks > 0 {
                self.stage = RespawnStage::Blinking {
                    toggles_done,
                    wait_ticks,
                };
                return;
            }

            // The wait after toggle `toggles_done - 1` has elapsed.
            if toggles_done - 1 == self.timing.control_return_toggle {
                step.enable_control = true;
            }
        }

        if toggles_done >= self.timing.blink_toggles {
            // Control must come back even if the return toggle was never reached.
            step.enable_control = true;
            step.finished = true;
            self.stage = RespawnStage::Finished;
            return;
        }

        step.toggle_visibility = true;
        toggles_done += 1;
        self.stage = RespawnStage::Blinking {
            toggles_done,
            wait_ticks: self.timing.blink_interval_ticks.max(1),
        };
    }
}
