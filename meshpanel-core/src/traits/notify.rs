//! Audio and haptic notification outputs

/// UI notification categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    None,
    ContactMessage,
    ChannelMessage,
    RoomMessage,
    NewContactMessage,
    Ack,
    HibernateWarning,
    HibernateCancel,
}

/// RTTTL melodies played for UI events
pub struct Melody;

impl Melody {
    pub const CONTACT_MESSAGE: &'static str = "MsgRcv3:d=4,o=6,b=200:32e,32g,32b,16c7";
    pub const CHANNEL_MESSAGE: &'static str = "kerplop:d=16,o=6,b=120:32g#,32c#";
    pub const ACK: &'static str = "ack:d=32,o=8,b=120:c";
    pub const HIBERNATE: &'static str = "hibernate:d=8,o=6,b=180:c,e,g";
    pub const CANCEL: &'static str = "cancel:d=8,o=6,b=180:g,e,c";

    /// Melody for an event; some events are haptic only
    pub fn for_event(event: UiEvent) -> Option<&'static str> {
        match event {
            UiEvent::ContactMessage => Some(Self::CONTACT_MESSAGE),
            UiEvent::ChannelMessage => Some(Self::CHANNEL_MESSAGE),
            UiEvent::Ack => Some(Self::ACK),
            UiEvent::HibernateWarning => Some(Self::HIBERNATE),
            UiEvent::HibernateCancel => Some(Self::CANCEL),
            UiEvent::None | UiEvent::RoomMessage | UiEvent::NewContactMessage => None,
        }
    }
}

/// Non-blocking melody player
pub trait Buzzer {
    /// Start an RTTTL melody; ignored while quiet
    fn play(&mut self, melody: &'static str);

    fn is_playing(&self) -> bool;

    /// Advance playback; call every tick while playing
    fn service(&mut self);

    /// Prepare for power-off (finish the current note, then stop)
    fn shutdown(&mut self);

    fn set_quiet(&mut self, quiet: bool);

    fn is_quiet(&self) -> bool;
}

/// Vibration motor
pub trait Vibration {
    /// Start one pulse
    fn trigger(&mut self);

    /// Advance the pulse timer; call every tick
    fn service(&mut self);
}
