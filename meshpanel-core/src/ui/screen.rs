//! Screen contract
//!
//! Screens are created once, owned by the UI task and addressed through
//! [`ScreenId`]. They never hold references to the task or the platform;
//! everything they need arrives through a [`UiContext`] for the duration
//! of one call, and anything they want from the task goes back as a
//! [`UiRequest`].

use heapless::Vec;
use meshpanel_display::DisplaySurface;

use crate::config::{BoardCapabilities, UiTimings};
use crate::input::Key;
use crate::traits::{
    Buzzer, Melody, Platform, PrefsStore, RtcClock, SensorManager, UiEvent, Vibration,
};

/// Most requests a single screen call can queue
pub const MAX_REQUESTS: usize = 4;

/// Handle of an owned screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenId {
    Splash,
    Home,
    MessagePreview,
}

/// Work a screen asks the task to do after the call returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiRequest {
    ShowAlert { text: &'static str, duration_ms: u32 },
    GotoHome,
    ToggleGps,
    ToggleScreensaver,
}

/// Per-call view of the task's shared state
pub struct UiContext<'a, P: Platform> {
    pub now_ms: u32,
    pub display_on: bool,
    pub platform: &'a mut P,
    pub caps: &'a BoardCapabilities,
    pub timings: &'a UiTimings,
    /// Unread message count reported by the mesh
    pub msg_count: u32,
    requests: Vec<UiRequest, MAX_REQUESTS>,
}

impl<'a, P: Platform> UiContext<'a, P> {
    pub fn new(
        now_ms: u32,
        display_on: bool,
        platform: &'a mut P,
        caps: &'a BoardCapabilities,
        timings: &'a UiTimings,
        msg_count: u32,
    ) -> Self {
        Self {
            now_ms,
            display_on,
            platform,
            caps,
            timings,
            msg_count,
            requests: Vec::new(),
        }
    }

    /// RTC time in unix seconds
    pub fn now_secs(&self) -> u32 {
        self.platform.clock().current_time()
    }

    pub fn request(&mut self, request: UiRequest) {
        if self.requests.push(request).is_err() {
            warn!("ui request queue full, dropped {:?}", request);
        }
    }

    pub fn alert(&mut self, text: &'static str, duration_ms: u32) {
        self.request(UiRequest::ShowAlert { text, duration_ms });
    }

    /// Play the cue for `event` right away
    pub fn notify(&mut self, event: UiEvent) {
        notify(&mut *self.platform, event);
    }

    /// GPS state as the sensor manager sees it
    pub fn gps_enabled(&mut self) -> bool {
        self.platform
            .sensors()
            .is_some_and(|s| s.setting("gps") == Some("1"))
    }

    pub fn buzzer_quiet(&mut self) -> bool {
        match self.platform.buzzer() {
            Some(buzzer) => buzzer.is_quiet(),
            None => self.platform.store().prefs().buzzer_quiet,
        }
    }

    /// Queued requests, consuming the context
    pub fn into_requests(self) -> Vec<UiRequest, MAX_REQUESTS> {
        self.requests
    }
}

/// Melody and haptic cue for a UI event
pub(crate) fn notify<P: Platform>(platform: &mut P, event: UiEvent) {
    if event == UiEvent::None {
        return;
    }
    if let (Some(buzzer), Some(melody)) = (platform.buzzer(), Melody::for_event(event)) {
        buzzer.play(melody);
    }
    if let Some(vibration) = platform.vibration() {
        vibration.trigger();
    }
}

/// One full-screen page
pub trait Screen<P: Platform> {
    /// Draw one frame; returns the delay before the next unforced render
    fn render(&mut self, display: &mut dyn DisplaySurface, ctx: &mut UiContext<'_, P>) -> u32;

    /// Handle a navigation key; returns whether it was consumed
    fn handle_input(&mut self, key: Key, ctx: &mut UiContext<'_, P>) -> bool;

    /// Called every tick while active
    fn poll(&mut self, _ctx: &mut UiContext<'_, P>) {}
}
