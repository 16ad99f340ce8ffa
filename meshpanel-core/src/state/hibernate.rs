//! Press-and-hold hibernation
//!
//! Holding the user button on the first home page walks through:
//!
//! ```text
//! Idle --press--> Pressed --held >= long (uptime ok)--> Pending --release--> Idle (Shutdown)
//!                    |                                     |
//!                 release                      held >= long + cancel (Cancel)
//!                    v                                     v
//!                  Idle                                Cancelled --release--> Idle
//! ```
//!
//! A cancelled hold never re-arms until the button is released.

/// Hold machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldState {
    Idle,
    /// Button down, warning not shown yet
    Pressed { since: u32 },
    /// Warning shown; releasing now powers off
    Pending { since: u32 },
    /// Held through the cancel window, waiting for release
    Cancelled,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldAction {
    /// Show the power-off warning
    Warn,
    /// Hold ran past the cancel window
    Cancel,
    /// Released during the warning
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct HoldMachine {
    state: HoldState,
    long_press_ms: u32,
    cancel_ms: u32,
    min_uptime_ms: u32,
}

impl HoldMachine {
    pub fn new(long_press_ms: u32, cancel_ms: u32, min_uptime_ms: u32) -> Self {
        Self {
            state: HoldState::Idle,
            long_press_ms,
            cancel_ms,
            min_uptime_ms,
        }
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, HoldState::Pending { .. })
    }

    /// Advance with the current button level
    ///
    /// `armed` is false whenever the UI is not on the first home page; the
    /// machine then drops back to idle.
    pub fn update(
        &mut self,
        armed: bool,
        pressed: bool,
        now_ms: u32,
        uptime_ms: u32,
    ) -> Option<HoldAction> {
        if !armed {
            self.state = HoldState::Idle;
            return None;
        }

        let cancel_at = self.long_press_ms.saturating_add(self.cancel_ms);
        let (next, action) = match self.state {
            HoldState::Idle if pressed => (HoldState::Pressed { since: now_ms }, None),
            HoldState::Idle => (HoldState::Idle, None),

            HoldState::Pressed { .. } if !pressed => (HoldState::Idle, None),
            HoldState::Pressed { since } => {
                let held = now_ms.wrapping_sub(since);
                if held >= cancel_at {
                    // Too early after boot for the whole window
                    (HoldState::Cancelled, None)
                } else if held >= self.long_press_ms && uptime_ms >= self.min_uptime_ms {
                    (HoldState::Pending { since }, Some(HoldAction::Warn))
                } else {
                    (self.state, None)
                }
            }

            HoldState::Pending { .. } if !pressed => (HoldState::Idle, Some(HoldAction::Shutdown)),
            HoldState::Pending { since } => {
                if now_ms.wrapping_sub(since) >= cancel_at {
                    (HoldState::Cancelled, Some(HoldAction::Cancel))
                } else {
                    (self.state, None)
                }
            }

            HoldState::Cancelled if !pressed => (HoldState::Idle, None),
            HoldState::Cancelled => (HoldState::Cancelled, None),
        };

        if next != self.state {
            trace!("hold {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LONG: u32 = 5000;
    const CANCEL: u32 = 3000;
    const MIN_UPTIME: u32 = 10_000;

    fn machine() -> HoldMachine {
        HoldMachine::new(LONG, CANCEL, MIN_UPTIME)
    }

    /// Hold from `start` for `ms`, stepping 50ms, then release; collect actions
    fn hold(m: &mut HoldMachine, start: u32, ms: u32) -> std::vec::Vec<HoldAction> {
        let mut actions = std::vec::Vec::new();
        let mut t = start;
        while t <= start + ms {
            actions.extend(m.update(true, true, t, t));
            t += 50;
        }
        actions.extend(m.update(true, false, t, t));
        actions
    }

    #[test]
    fn test_release_during_warning_shuts_down() {
        let mut m = machine();
        let actions = hold(&mut m, 20_000, 6000);
        assert_eq!(actions, [HoldAction::Warn, HoldAction::Shutdown]);
        assert_eq!(m.state(), HoldState::Idle);
    }

    #[test]
    fn test_hold_through_window_cancels() {
        let mut m = machine();
        let actions = hold(&mut m, 20_000, 9000);
        assert_eq!(actions, [HoldAction::Warn, HoldAction::Cancel]);
        assert_eq!(m.state(), HoldState::Idle);
    }

    #[test]
    fn test_cancelled_waits_for_release() {
        let mut m = machine();
        let mut t = 20_000;
        while t <= 20_000 + LONG + CANCEL {
            m.update(true, true, t, t);
            t += 100;
        }
        assert_eq!(m.state(), HoldState::Cancelled);

        // Still held: no new warning however long
        for _ in 0..200 {
            assert_eq!(m.update(true, true, t, t), None);
            t += 100;
        }
        assert_eq!(m.update(true, false, t, t), None);
        assert_eq!(m.state(), HoldState::Idle);
    }

    #[test]
    fn test_no_warning_before_min_uptime() {
        let mut m = machine();
        let actions = hold(&mut m, 0, 6000);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_warning_once_uptime_reached() {
        let mut m = machine();
        // Press at 4s; the hold reaches 5s at 9s uptime, 10s uptime arrives mid-window
        let mut warned_at = None;
        let mut t = 4000;
        while t < 12_000 {
            if m.update(true, true, t, t) == Some(HoldAction::Warn) {
                warned_at = Some(t);
            }
            t += 50;
        }
        assert_eq!(warned_at, Some(MIN_UPTIME));
    }

    #[test]
    fn test_disarm_resets() {
        let mut m = machine();
        m.update(true, true, 20_000, 20_000);
        m.update(true, true, 25_000, 25_000);
        assert!(m.is_pending());
        assert_eq!(m.update(false, true, 25_100, 25_100), None);
        assert_eq!(m.state(), HoldState::Idle);
    }

    proptest! {
        #[test]
        fn prop_short_hold_is_silent(ms in 0u32..LONG) {
            let mut m = machine();
            prop_assert!(hold(&mut m, 20_000, ms.saturating_sub(50)).is_empty());
            prop_assert_eq!(m.state(), HoldState::Idle);
        }

        #[test]
        fn prop_idle_release_is_idempotent(count in 1usize..50, start in 0u32..1_000_000) {
            let mut m = machine();
            for i in 0..count {
                let t = start + i as u32 * 10;
                prop_assert_eq!(m.update(true, false, t, t), None);
            }
            prop_assert_eq!(m.state(), HoldState::Idle);
        }

        #[test]
        fn prop_at_most_one_warning_per_press(ms in 0u32..20_000) {
            let mut m = machine();
            let actions = hold(&mut m, 20_000, ms);
            let warns = actions.iter().filter(|a| **a == HoldAction::Warn).count();
            prop_assert!(warns <= 1);
            let ends = actions
                .iter()
                .filter(|a| matches!(a, HoldAction::Cancel | HoldAction::Shutdown))
                .count();
            prop_assert_eq!(warns, ends);
        }
    }
}
