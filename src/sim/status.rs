//! Power-up status board
//!
//! Timers count scene ticks, not seconds.

use serde::{Deserialize, Serialize};

/// Active power-up effects and their remaining ticks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub invincible: bool,
    pub invincible_ticks: u32,
    pub expanded: bool,
    pub expanded_ticks: u32,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate_invincibility(&mut self, ticks: u32) {
        self.invincible = true;
        self.invincible_ticks = ticks;
    }

    pub fn deactivate_invincibility(&mut self) {
        self.invincible = false;
        self.invincible_ticks = 0;
    }

    pub fn activate_expand(&mut self, ticks: u32) {
        self.expanded = true;
        self.expanded_ticks = ticks;
    }

    pub fn deactivate_expand(&mut self) {
        self.expanded = false;
        self.expanded_ticks = 0;
    }

    /// Count down active timers; an effect ends on the tick its timer hits zero
    pub fn tick(&mut self) {
        if self.invincible {
            self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
            if self.invincible_ticks == 0 {
                log::debug!("Invincibility expired");
                self.deactivate_invincibility();
            }
        }
        if self.expanded {
            self.expanded_ticks = self.expanded_ticks.saturating_sub(1);
            if self.expanded_ticks == 0 {
                log::debug!("Expansion expired");
                self.deactivate_expand();
            }
        }
    }
}
