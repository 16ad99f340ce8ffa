//! Input classification
//!
//! Maps classified button events from each physical source onto navigation
//! keys and UI-level intents, according to the board's input layout.

pub mod buttons;

use meshpanel_hal::ButtonEvent;

use crate::config::InputLayout;
use crate::traits::InputSource;

pub use buttons::{ButtonInputs, NoPress};

/// Navigation key delivered to screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Enter,
    Left,
    Right,
    Next,
    Prev,
    Select,
}

/// What a button event asks the UI to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intent {
    /// Short press; goes through the display-wake gate
    Press(Key),
    /// Long press; goes through the rescue gate
    Hold(Key),
    /// Toggle buzzer quiet mode
    ToggleBuzzer,
    /// Toggle the always-on backlight override
    ToggleBacklight,
}

/// Map one event from `source` to an intent
pub fn classify(layout: InputLayout, source: InputSource, event: ButtonEvent) -> Option<Intent> {
    use ButtonEvent::*;

    match (layout, source) {
        (InputLayout::Joystick, InputSource::User) => match event {
            Click => Some(Intent::Press(Key::Enter)),
            LongPress => Some(Intent::Hold(Key::Enter)),
            _ => None,
        },
        (InputLayout::Joystick, InputSource::JoystickLeft) => match event {
            Click => Some(Intent::Press(Key::Left)),
            LongPress => Some(Intent::Hold(Key::Left)),
            _ => None,
        },
        (InputLayout::Joystick, InputSource::JoystickRight) => match event {
            Click => Some(Intent::Press(Key::Right)),
            LongPress => Some(Intent::Hold(Key::Right)),
            _ => None,
        },
        (InputLayout::Joystick, InputSource::Back) => match event {
            TripleClick => Some(Intent::ToggleBuzzer),
            _ => None,
        },
        (_, InputSource::Analog) => match event {
            Click => Some(Intent::Press(Key::Next)),
            DoubleClick => Some(Intent::Press(Key::Prev)),
            TripleClick => Some(Intent::ToggleBuzzer),
            LongPress => Some(Intent::Hold(Key::Enter)),
            QuadrupleClick => None,
        },
        (InputLayout::SingleButton, InputSource::User) => match event {
            Click => Some(Intent::Press(Key::Next)),
            DoubleClick => Some(Intent::Press(Key::Prev)),
            TripleClick => Some(Intent::ToggleBuzzer),
            QuadrupleClick => Some(Intent::ToggleBacklight),
            LongPress => Some(Intent::Hold(Key::Enter)),
        },
        (InputLayout::SingleButton, _) => None,
    }
}

/// Sources polled for `layout`, in priority order (later wins)
pub fn sources(layout: InputLayout, user_button: bool) -> &'static [InputSource] {
    match (layout, user_button) {
        (InputLayout::Joystick, _) => &[
            InputSource::User,
            InputSource::JoystickLeft,
            InputSource::JoystickRight,
            InputSource::Back,
        ],
        (InputLayout::SingleButton, true) => &[InputSource::User],
        (InputLayout::SingleButton, false) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_button_mapping() {
        let l = InputLayout::SingleButton;
        let u = InputSource::User;
        assert_eq!(classify(l, u, ButtonEvent::Click), Some(Intent::Press(Key::Next)));
        assert_eq!(classify(l, u, ButtonEvent::DoubleClick), Some(Intent::Press(Key::Prev)));
        assert_eq!(classify(l, u, ButtonEvent::LongPress), Some(Intent::Hold(Key::Enter)));
        assert_eq!(classify(l, u, ButtonEvent::TripleClick), Some(Intent::ToggleBuzzer));
        assert_eq!(classify(l, u, ButtonEvent::QuadrupleClick), Some(Intent::ToggleBacklight));
    }

    #[test]
    fn test_joystick_mapping() {
        let l = InputLayout::Joystick;
        assert_eq!(
            classify(l, InputSource::User, ButtonEvent::Click),
            Some(Intent::Press(Key::Enter))
        );
        assert_eq!(
            classify(l, InputSource::JoystickLeft, ButtonEvent::Click),
            Some(Intent::Press(Key::Left))
        );
        assert_eq!(
            classify(l, InputSource::JoystickRight, ButtonEvent::LongPress),
            Some(Intent::Hold(Key::Right))
        );
        assert_eq!(classify(l, InputSource::Back, ButtonEvent::Click), None);
        assert_eq!(
            classify(l, InputSource::Back, ButtonEvent::TripleClick),
            Some(Intent::ToggleBuzzer)
        );
        assert_eq!(classify(l, InputSource::User, ButtonEvent::DoubleClick), None);
    }

    #[test]
    fn test_analog_has_no_backlight_toggle() {
        for layout in [InputLayout::SingleButton, InputLayout::Joystick] {
            assert_eq!(
                classify(layout, InputSource::Analog, ButtonEvent::QuadrupleClick),
                None
            );
            assert_eq!(
                classify(layout, InputSource::Analog, ButtonEvent::Click),
                Some(Intent::Press(Key::Next))
            );
        }
    }

    #[test]
    fn test_source_order() {
        assert_eq!(sources(InputLayout::SingleButton, true), &[InputSource::User]);
        assert!(sources(InputLayout::SingleButton, false).is_empty());
        assert_eq!(sources(InputLayout::Joystick, true).len(), 4);
    }
}
