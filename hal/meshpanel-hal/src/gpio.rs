//! GPIO pin abstractions
//!
//! Digital input/output traits implemented by the chip glue, plus a
//! reference-counted output for power rails shared by several peripherals
//! (display, GPS and sensors on the same VEXT switch).

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Output that drives an active level rather than a raw logic level
///
/// Boards disagree on polarity (GPS enable is active-low on some, the VEXT
/// rail active-high on others); this keeps that detail out of callers.
#[derive(Debug)]
pub struct ActiveLevelPin<P> {
    pin: P,
    active_high: bool,
}

impl<P: OutputPin> ActiveLevelPin<P> {
    /// Wrap `pin`, treating `active_high` as the "on" level
    pub fn new(pin: P, active_high: bool) -> Self {
        Self { pin, active_high }
    }

    /// Drive the active level
    pub fn activate(&mut self) {
        self.pin.set_state(self.active_high);
    }

    /// Drive the inactive level
    pub fn deactivate(&mut self) {
        self.pin.set_state(!self.active_high);
    }

    /// Whether the pin currently sits at its active level
    pub fn is_active(&self) -> bool {
        self.pin.is_set_high() == self.active_high
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

/// Reference-counted power switch
///
/// The rail is switched on by the first `claim` and off by the last
/// `release`. Unbalanced releases are ignored.
#[derive(Debug)]
pub struct RefCountedPin<P> {
    pin: ActiveLevelPin<P>,
    claims: u8,
}

impl<P: OutputPin> RefCountedPin<P> {
    /// Create a switch; the rail starts off
    pub fn new(pin: P, active_high: bool) -> Self {
        let mut pin = ActiveLevelPin::new(pin, active_high);
        pin.deactivate();
        Self { pin, claims: 0 }
    }

    /// Take a reference on the rail, powering it if it was off
    pub fn claim(&mut self) {
        if self.claims == 0 {
            self.pin.activate();
        }
        self.claims = self.claims.saturating_add(1);
    }

    /// Drop a reference, powering the rail down on the last one
    pub fn release(&mut self) {
        match self.claims {
            0 => {}
            1 => {
                self.claims = 0;
                self.pin.deactivate();
            }
            _ => self.claims -= 1,
        }
    }

    /// Number of outstanding claims
    pub fn claims(&self) -> u8 {
        self.claims
    }

    /// Whether the rail is powered
    pub fn is_on(&self) -> bool {
        self.pin.is_active()
    }
}
