//! Physical input sources

use meshpanel_hal::ButtonEvent;

/// One physical button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSource {
    /// Single user button, or the joystick centre
    User,
    JoystickLeft,
    JoystickRight,
    Back,
    /// Button sampled through the ADC
    Analog,
}

/// Classified button events per source
pub trait InputSources {
    /// Advance the classifier of `source` and return its event, if any
    fn poll(&mut self, source: InputSource, now_ms: u32) -> Option<ButtonEvent>;

    /// Raw level of the user button, for the hibernation hold
    fn is_user_button_pressed(&mut self) -> bool;
}
