//! Button press classifier
//!
//! Turns a sampled press level into discrete events: single and multi-click
//! bursts and long presses. Works with a plain GPIO button or with an
//! analogue ladder read through the ADC.
//!
//! State machine:
//!
//! ```text
//! Idle --press--> Down --release--> Up --gap expires--> Idle (emit N clicks)
//!                  |                  |
//!                  |                  +--press--> Down (clicks carried over)
//!                  +--held >= long--> Held --release--> Idle
//! ```

use crate::adc::AdcReader;
use crate::gpio::InputPin;

/// Classified button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Click,
    DoubleClick,
    TripleClick,
    /// Four or more clicks in one burst
    QuadrupleClick,
    LongPress,
}

impl ButtonEvent {
    fn from_clicks(clicks: u8) -> Option<Self> {
        match clicks {
            0 => None,
            1 => Some(Self::Click),
            2 => Some(Self::DoubleClick),
            3 => Some(Self::TripleClick),
            _ => Some(Self::QuadrupleClick),
        }
    }
}

/// Anything that can report whether the button is currently held
pub trait PressSource {
    fn is_pressed(&mut self) -> bool;
}

/// Button wired to a GPIO input
pub struct DigitalPress<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> DigitalPress<P> {
    /// `active_low` is true for the usual pull-up-to-VCC wiring
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }
}

impl<P: InputPin> PressSource for DigitalPress<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_high() != self.active_low
    }
}

/// Button pulling an ADC input below a threshold
pub struct AnalogPress<A> {
    adc: A,
    threshold: u16,
}

impl<A: AdcReader> AnalogPress<A> {
    pub fn new(adc: A, threshold: u16) -> Self {
        Self { adc, threshold }
    }
}

impl<A: AdcReader> PressSource for AnalogPress<A> {
    fn is_pressed(&mut self) -> bool {
        self.adc.read_raw() < self.threshold
    }
}

/// Classifier timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTimings {
    /// Level must be stable this long before it counts
    pub debounce_ms: u32,
    /// Maximum release gap between clicks of one burst
    pub multi_click_ms: u32,
    /// Hold time for a long press
    pub long_press_ms: u32,
}

impl Default for ButtonTimings {
    fn default() -> Self {
        Self {
            debounce_ms: 20,
            multi_click_ms: 300,
            long_press_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Down { since: u32, clicks: u8 },
    Up { since: u32, clicks: u8 },
    Held,
}

/// Debounced multi-click / long-press classifier
pub struct MultiClickButton<S> {
    source: S,
    timings: ButtonTimings,
    state: State,
    raw: bool,
    raw_changed_at: u32,
    stable: bool,
}

impl<S: PressSource> MultiClickButton<S> {
    pub fn new(source: S) -> Self {
        Self::with_timings(source, ButtonTimings::default())
    }

    pub fn with_timings(source: S, timings: ButtonTimings) -> Self {
        Self {
            source,
            timings,
            state: State::Idle,
            raw: false,
            raw_changed_at: 0,
            stable: false,
        }
    }

    /// Sample the source and advance the classifier
    ///
    /// Should be called every few milliseconds. Returns at most one event.
    pub fn check(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        let raw = self.source.is_pressed();
        if raw != self.raw {
            self.raw = raw;
            self.raw_changed_at = now_ms;
        }

        if self.raw != self.stable
            && now_ms.wrapping_sub(self.raw_changed_at) >= self.timings.debounce_ms
        {
            self.stable = self.raw;
            self.on_edge(now_ms);
        }

        match self.state {
            State::Down { since, .. }
                if now_ms.wrapping_sub(since) >= self.timings.long_press_ms =>
            {
                self.state = State::Held;
                Some(ButtonEvent::LongPress)
            }
            State::Up { since, clicks }
                if now_ms.wrapping_sub(since) >= self.timings.multi_click_ms =>
            {
                self.state = State::Idle;
                ButtonEvent::from_clicks(clicks)
            }
            _ => None,
        }
    }

    fn on_edge(&mut self, now_ms: u32) {
        self.state = match (self.state, self.stable) {
            (State::Idle, true) => State::Down {
                since: now_ms,
                clicks: 0,
            },
            (State::Up { clicks, .. }, true) => State::Down {
                since: now_ms,
                clicks,
            },
            (State::Down { clicks, .. }, false) => State::Up {
                since: now_ms,
                clicks: clicks.saturating_add(1),
            },
            (State::Held, false) => State::Idle,
            (state, _) => state,
        };
    }

    /// Debounced press level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Sample the source directly, bypassing debounce and classification
    pub fn read_level(&mut self) -> bool {
        self.source.is_pressed()
    }

    pub fn timings(&self) -> &ButtonTimings {
        &self.timings
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
