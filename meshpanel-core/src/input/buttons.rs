//! Button bank
//!
//! [`ButtonInputs`] is a ready-made [`InputSources`] built from the HAL's
//! multi-click classifiers. Firmware without unusual input hardware can hand
//! it to the platform as is.

use meshpanel_hal::button::ButtonEvent;
use meshpanel_hal::{MultiClickButton, PressSource};

use crate::traits::{InputSource, InputSources};

/// Press source for an absent button
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPress;

impl PressSource for NoPress {
    fn is_pressed(&mut self) -> bool {
        false
    }
}

/// Classifiers for every fitted button
///
/// `S` is the digital button source type, `A` the analogue one.
pub struct ButtonInputs<S, A = NoPress> {
    user: Option<MultiClickButton<S>>,
    left: Option<MultiClickButton<S>>,
    right: Option<MultiClickButton<S>>,
    back: Option<MultiClickButton<S>>,
    analog: Option<MultiClickButton<A>>,
}

impl<S: PressSource, A: PressSource> Default for ButtonInputs<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PressSource, A: PressSource> ButtonInputs<S, A> {
    /// No buttons fitted
    pub fn new() -> Self {
        Self {
            user: None,
            left: None,
            right: None,
            back: None,
            analog: None,
        }
    }

    /// User button, or the joystick centre
    pub fn with_user(mut self, button: MultiClickButton<S>) -> Self {
        self.user = Some(button);
        self
    }

    pub fn with_joystick(
        mut self,
        left: MultiClickButton<S>,
        right: MultiClickButton<S>,
        back: MultiClickButton<S>,
    ) -> Self {
        self.left = Some(left);
        self.right = Some(right);
        self.back = Some(back);
        self
    }

    pub fn with_analog(mut self, button: MultiClickButton<A>) -> Self {
        self.analog = Some(button);
        self
    }

    fn digital(&mut self, source: InputSource) -> Option<&mut MultiClickButton<S>> {
        match source {
            InputSource::User => self.user.as_mut(),
            InputSource::JoystickLeft => self.left.as_mut(),
            InputSource::JoystickRight => self.right.as_mut(),
            InputSource::Back => self.back.as_mut(),
            InputSource::Analog => None,
        }
    }
}

impl<S: PressSource, A: PressSource> InputSources for ButtonInputs<S, A> {
    fn poll(&mut self, source: InputSource, now_ms: u32) -> Option<ButtonEvent> {
        if source == InputSource::Analog {
            return self.analog.as_mut()?.check(now_ms);
        }
        self.digital(source)?.check(now_ms)
    }

    fn is_user_button_pressed(&mut self) -> bool {
        self.user.as_mut().is_some_and(|b| b.read_level())
    }
}
