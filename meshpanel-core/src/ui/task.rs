//! UI task
//!
//! Single owner of the display, the screens and every UI state machine. The
//! firmware calls [`UiTask::tick`] from its main loop (every few
//! milliseconds) with a monotonic millisecond count. One tick:
//!
//! 1. Advances the press-and-hold hibernation machine; while the power-off
//!    warning is up, only audio and haptics are serviced
//! 2. Samples every input source; the last source with an event wins
//! 3. Dispatches the key to the active screen
//! 4. Drives the status LED and the buzzer
//! 5. Polls the active screen
//! 6. Renders if the refresh deadline has passed, alert on top
//! 7. Applies auto-off (screensaver or display off)
//! 8. Services vibration and watches the battery

use meshpanel_display::{Color, DisplaySurface};
use meshpanel_hal::{Board, OutputPin};

use super::format;
use super::home::HomeScreen;
use super::preview::MessagePreviewScreen;
use super::screen::{self, Screen, ScreenId, UiContext, UiRequest};
use super::splash::{SplashInfo, SplashScreen};
use crate::config::{BoardCapabilities, ConfigError, UiConfig, UiTimings};
use crate::input::{self, Intent, Key};
use crate::state::{is_after, Alert, AutoOff, Heartbeat, HoldAction, HoldMachine};
use crate::traits::{
    Buzzer, InputSource, InputSources, MeshNode, Platform, PrefsStore, RadioStatus, RtcClock,
    SensorManager, UiEvent, Vibration,
};

/// The three screens, addressed by [`ScreenId`]
pub struct Screens {
    pub splash: SplashScreen,
    pub home: HomeScreen,
    pub preview: MessagePreviewScreen,
}

impl Screens {
    pub fn get_mut<P: Platform>(&mut self, id: ScreenId) -> &mut dyn Screen<P> {
        match id {
            ScreenId::Splash => &mut self.splash,
            ScreenId::Home => &mut self.home,
            ScreenId::MessagePreview => &mut self.preview,
        }
    }
}

pub struct UiTask<D, P: Platform> {
    display: Option<D>,
    platform: P,
    caps: BoardCapabilities,
    timings: UiTimings,
    screens: Screens,
    current: ScreenId,
    alert: Alert,
    hold: HoldMachine,
    auto_off: AutoOff,
    heartbeat: Heartbeat,
    next_refresh: u32,
    started_at: u32,
    next_batt_check: u32,
    last_analog_read: u32,
    msg_count: u32,
    /// Keep the display on regardless of auto-off
    force_backlight: bool,
    /// Result of the last `handle_input`, kept for callers; not acted upon
    last_consumed: Option<bool>,
    halted: bool,
}

impl<D: DisplaySurface, P: Platform> UiTask<D, P> {
    /// Build the task; `display` is `None` on headless boards
    pub fn new(
        display: Option<D>,
        platform: P,
        config: UiConfig,
        splash: SplashInfo,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let timings = config.timings;

        Ok(Self {
            display,
            platform,
            caps: config.caps,
            timings,
            screens: Screens {
                splash: SplashScreen::new(splash),
                home: HomeScreen::new(&config.caps),
                preview: MessagePreviewScreen::new(),
            },
            current: ScreenId::Splash,
            alert: Alert::new(),
            hold: HoldMachine::new(
                timings.long_press_ms,
                timings.hibernate_cancel_ms,
                timings.hibernate_min_uptime_ms,
            ),
            auto_off: AutoOff::new(timings.auto_off_ms, 0),
            heartbeat: Heartbeat::new(),
            next_refresh: 0,
            started_at: 0,
            next_batt_check: 0,
            last_analog_read: 0,
            msg_count: 0,
            force_backlight: false,
            last_consumed: None,
            halted: false,
        })
    }

    /// Power up the UI and show the splash screen
    pub fn begin(&mut self, now_ms: u32) {
        self.started_at = now_ms;
        self.auto_off = AutoOff::new(self.timings.auto_off_ms, now_ms);
        self.next_batt_check = now_ms;
        self.last_analog_read = now_ms;

        self.apply_gps_prefs();

        if let Some(display) = self.display.as_mut() {
            display.turn_on();
        }

        let quiet = self.platform.store().prefs().buzzer_quiet;
        if let Some(buzzer) = self.platform.buzzer() {
            buzzer.set_quiet(quiet);
        }

        self.screens.splash.start(now_ms, self.timings.boot_screen_ms);
        self.current = ScreenId::Splash;
        self.next_refresh = now_ms;
        info!("ui started, {} home pages", self.screens.home.pages().len());
    }

    fn apply_gps_prefs(&mut self) {
        let (enabled, interval) = {
            let prefs = self.platform.store().prefs();
            (prefs.gps_enabled, prefs.gps_interval_s)
        };
        if let Some(sensors) = self.platform.sensors() {
            sensors.set_setting("gps", if enabled { "1" } else { "0" });
            if interval > 0 {
                let value: heapless::String<12> = format::text(format_args!("{}", interval));
                sensors.set_setting("gps_interval", &value);
            }
        }
        if self.caps.gps {
            self.platform.set_gps_power(enabled);
        }
    }

    /// Run one iteration of the UI loop
    pub fn tick(&mut self, now_ms: u32) {
        if self.halted {
            return;
        }

        let armed = self.caps.user_button
            && self.current == ScreenId::Home
            && self.screens.home.is_on_first_page()
            && !self.screens.home.is_screensaver();
        let pressed = armed && self.platform.inputs().is_user_button_pressed();
        let uptime = now_ms.wrapping_sub(self.started_at);
        if let Some(action) = self.hold.update(armed, pressed, now_ms, uptime) {
            self.on_hold_action(action, now_ms);
            if self.halted {
                return;
            }
        }
        if self.hold.is_pending() {
            self.service_outputs();
            return;
        }

        if let Some(key) = self.read_input(now_ms) {
            self.dispatch(key, now_ms);
        }

        self.update_led(now_ms);
        if let Some(buzzer) = self.platform.buzzer() {
            buzzer.service();
        }

        self.with_screen(now_ms, |screen, ctx| screen.poll(ctx));
        self.render(now_ms);
        self.check_auto_off(now_ms);

        if let Some(vibration) = self.platform.vibration() {
            vibration.service();
        }
        self.check_battery(now_ms);
    }

    fn service_outputs(&mut self) {
        if let Some(buzzer) = self.platform.buzzer() {
            buzzer.service();
        }
        if let Some(vibration) = self.platform.vibration() {
            vibration.service();
        }
    }

    fn read_input(&mut self, now_ms: u32) -> Option<Key> {
        let layout = self.caps.input_layout;
        let mut key = None;

        for &source in input::sources(layout, self.caps.user_button) {
            if let Some(event) = self.platform.inputs().poll(source, now_ms) {
                debug!("button {:?}: {:?}", source, event);
                if let Some(intent) = input::classify(layout, source, event) {
                    key = self.gate(intent, now_ms);
                }
            }
        }

        if self.caps.analog_button
            && now_ms.wrapping_sub(self.last_analog_read) > self.timings.analog_poll_ms
        {
            let source = InputSource::Analog;
            if let Some(event) = self.platform.inputs().poll(source, now_ms) {
                debug!("button {:?}: {:?}", source, event);
                if let Some(intent) = input::classify(layout, source, event) {
                    key = self.gate(intent, now_ms);
                }
            }
            self.last_analog_read = now_ms;
        }

        key
    }

    /// Apply the wake and rescue gates; `None` means the event was consumed
    fn gate(&mut self, intent: Intent, now_ms: u32) -> Option<Key> {
        match intent {
            Intent::Press(key) => self.check_display_on(key, now_ms),
            Intent::Hold(key) => self.handle_long_press(key, now_ms),
            Intent::ToggleBuzzer => {
                self.check_display_on(Key::Select, now_ms);
                self.toggle_buzzer(now_ms);
                None
            }
            Intent::ToggleBacklight => {
                self.check_display_on(Key::Select, now_ms);
                self.toggle_backlight(now_ms);
                None
            }
        }
    }

    fn check_display_on(&mut self, key: Key, now_ms: u32) -> Option<Key> {
        let Some(display) = self.display.as_mut() else {
            return Some(key);
        };

        let mut key = Some(key);
        if !display.is_on() {
            display.turn_on();
            self.screens.home.leave_screensaver();
            debug!("display woken");
            key = None;
        } else if self.current == ScreenId::Home && self.screens.home.is_screensaver() {
            self.screens.home.leave_screensaver();
            key = None;
        }
        self.auto_off.extend(now_ms);
        self.next_refresh = now_ms;
        key
    }

    fn handle_long_press(&mut self, key: Key, now_ms: u32) -> Option<Key> {
        if now_ms.wrapping_sub(self.started_at) < self.timings.rescue_window_ms {
            info!("long press during boot, entering CLI rescue");
            self.platform.mesh().enter_cli_rescue();
            return None;
        }
        Some(key)
    }

    fn dispatch(&mut self, key: Key, now_ms: u32) {
        let consumed = self.with_screen(now_ms, |screen, ctx| screen.handle_input(key, ctx));
        trace!("key {:?} consumed: {}", key, consumed);
        self.last_consumed = Some(consumed);
        self.auto_off.extend(now_ms);
        self.next_refresh = now_ms;
    }

    /// Run `f` on the active screen, then apply what it requested
    fn with_screen<R>(
        &mut self,
        now_ms: u32,
        f: impl FnOnce(&mut dyn Screen<P>, &mut UiContext<'_, P>) -> R,
    ) -> R {
        let display_on = self.display.as_ref().is_some_and(|d| d.is_on());
        let mut ctx = UiContext::new(
            now_ms,
            display_on,
            &mut self.platform,
            &self.caps,
            &self.timings,
            self.msg_count,
        );
        let result = f(self.screens.get_mut::<P>(self.current), &mut ctx);
        for request in ctx.into_requests() {
            self.apply(request, now_ms);
        }
        result
    }

    fn apply(&mut self, request: UiRequest, now_ms: u32) {
        match request {
            UiRequest::ShowAlert { text, duration_ms } => self.show_alert(text, duration_ms, now_ms),
            UiRequest::GotoHome => self.goto_home(now_ms),
            UiRequest::ToggleGps => self.toggle_gps(now_ms),
            UiRequest::ToggleScreensaver => self.toggle_screensaver(now_ms),
        }
    }

    fn set_screen(&mut self, id: ScreenId, now_ms: u32) {
        if self.current != id {
            info!("screen {:?} -> {:?}", self.current, id);
            self.current = id;
        }
        self.next_refresh = now_ms;
    }

    pub fn goto_home(&mut self, now_ms: u32) {
        self.set_screen(ScreenId::Home, now_ms);
    }

    /// Overlay `text` on the current screen for `duration_ms`
    pub fn show_alert(&mut self, text: &str, duration_ms: u32, now_ms: u32) {
        self.alert.show(text, now_ms, duration_ms);
        self.next_refresh = now_ms;
    }

    /// Play the audio and haptic cue for `event`
    pub fn notify(&mut self, event: UiEvent) {
        screen::notify(&mut self.platform, event);
    }

    /// A message arrived; `msg_count` is the mesh's unread total
    pub fn new_msg(&mut self, path_len: u8, from: &str, text: &str, msg_count: u32, now_ms: u32) {
        self.msg_count = msg_count;
        let now_secs = self.platform.clock().current_time();
        self.screens.preview.add_preview(now_secs, path_len, from, text);

        let screensaver = self.current == ScreenId::Home && self.screens.home.is_screensaver();
        if !screensaver {
            self.set_screen(ScreenId::MessagePreview, now_ms);
        }

        if let Some(display) = self.display.as_mut() {
            // A connected companion app shows the message itself
            if !display.is_on() && !self.platform.mesh().has_connection() {
                display.turn_on();
            }
            if display.is_on() {
                self.auto_off.extend(now_ms);
                self.next_refresh = now_ms;
            }
        }
    }

    /// The mesh's unread total changed
    pub fn msg_read(&mut self, msg_count: u32, now_ms: u32) {
        self.msg_count = msg_count;
        if msg_count == 0 {
            self.goto_home(now_ms);
        }
    }

    pub fn toggle_buzzer(&mut self, now_ms: u32) {
        let quiet = match self.platform.buzzer() {
            Some(buzzer) => {
                let quiet = !buzzer.is_quiet();
                buzzer.set_quiet(quiet);
                quiet
            }
            None => {
                self.show_alert("Buzzer N/A", 1000, now_ms);
                return;
            }
        };
        if !quiet {
            self.notify(UiEvent::Ack);
        }
        self.platform.store().prefs_mut().buzzer_quiet = quiet;
        self.platform.store().save();
        info!("buzzer quiet: {}", quiet);
        self.show_alert(if quiet { "Buzzer: OFF" } else { "Buzzer: ON" }, 800, now_ms);
    }

    pub fn toggle_backlight(&mut self, now_ms: u32) {
        self.force_backlight = !self.force_backlight;
        self.auto_off.extend(now_ms);
        let text = if self.force_backlight {
            "Backlight: ALWAYS"
        } else {
            "Backlight: BUTTON"
        };
        self.show_alert(text, 1000, now_ms);
    }

    /// Flip the persisted screensaver preference; turning it on from Home
    /// starts the screensaver right away
    pub fn toggle_screensaver(&mut self, now_ms: u32) {
        let store = self.platform.store();
        let enabled = !store.prefs().screensaver_enabled;
        store.prefs_mut().screensaver_enabled = enabled;
        store.save();
        if !enabled {
            self.screens.home.leave_screensaver();
        } else if self.current == ScreenId::Home {
            self.screens.home.enter_screensaver();
        }
        info!("screensaver enabled: {}", enabled);
        let text = if enabled {
            "Screensaver: ON"
        } else {
            "Screensaver: OFF"
        };
        self.show_alert(text, 1000, now_ms);
    }

    /// Flip GPS power through the sensor manager's `gps` setting
    pub fn toggle_gps(&mut self, now_ms: u32) {
        let enable = match self.platform.sensors() {
            Some(sensors) => match sensors.setting("gps") {
                Some(value) => value != "1",
                None => return,
            },
            None => return,
        };

        if let Some(sensors) = self.platform.sensors() {
            sensors.set_setting("gps", if enable { "1" } else { "0" });
        }
        if self.caps.gps {
            self.platform.set_gps_power(enable);
        }
        self.platform.store().prefs_mut().gps_enabled = enable;
        self.notify(UiEvent::Ack);
        self.platform.store().save();
        info!("gps enabled: {}", enable);
        let text = if enable { "GPS: Enabled" } else { "GPS: Disabled" };
        self.show_alert(text, 800, now_ms);
    }

    fn update_led(&mut self, now_ms: u32) {
        if !self.caps.status_led {
            return;
        }
        if let Some(level) = self.heartbeat.update(now_ms, self.msg_count > 0) {
            if let Some(led) = self.platform.status_led() {
                led.set_state(level);
            }
        }
    }

    fn render(&mut self, now_ms: u32) {
        let Some(display) = self.display.as_mut() else {
            return;
        };
        if !display.is_on() || is_after(self.next_refresh, now_ms) {
            return;
        }

        let mut ctx = UiContext::new(
            now_ms,
            true,
            &mut self.platform,
            &self.caps,
            &self.timings,
            self.msg_count,
        );
        display.start_frame(Color::Dark);
        let delay = self.screens.get_mut::<P>(self.current).render(display, &mut ctx);
        let requests = ctx.into_requests();

        if self.alert.is_active(now_ms) {
            draw_alert(display, self.alert.text());
            self.next_refresh = self.alert.expiry();
        } else {
            self.next_refresh = now_ms.wrapping_add(delay);
        }
        if let Err(err) = display.end_frame() {
            warn!("frame not presented: {:?}", err);
        }

        for request in requests {
            self.apply(request, now_ms);
        }
    }

    fn check_auto_off(&mut self, now_ms: u32) {
        if self.force_backlight || !self.auto_off.is_due(now_ms) {
            return;
        }
        let Some(display) = self.display.as_mut() else {
            return;
        };
        if !display.is_on() {
            return;
        }

        let screensaver = self.platform.store().prefs().screensaver_enabled;
        if screensaver && self.current == ScreenId::Home {
            if !self.screens.home.is_screensaver() {
                info!("auto-off: screensaver");
                self.screens.home.enter_screensaver();
                self.next_refresh = now_ms;
            }
        } else {
            info!("auto-off: display off");
            display.turn_off();
        }
    }

    fn check_battery(&mut self, now_ms: u32) {
        let Some(threshold) = self.timings.low_battery_mv else {
            return;
        };
        if !is_after(now_ms, self.next_batt_check) {
            return;
        }
        self.next_batt_check = now_ms.wrapping_add(self.timings.battery_check_ms);

        let mv = self.platform.board().batt_milli_volts();
        if mv == 0 || mv >= threshold {
            return;
        }

        warn!("battery at {} mV, shutting down", mv);
        if self.caps.display_tech.retains_image() {
            if let Some(display) = self.display.as_mut() {
                let mid = display.width() / 2;
                display.start_frame(Color::Dark);
                display.set_text_size(2);
                display.set_color(Color::Red);
                display.draw_text_centered(mid, 20, "Low Battery.");
                display.draw_text_centered(mid, 40, "Shutting Down!");
                if let Err(err) = display.end_frame() {
                    warn!("low battery notice not presented: {:?}", err);
                }
            }
        }
        self.shutdown(false);
    }

    fn on_hold_action(&mut self, action: HoldAction, now_ms: u32) {
        match action {
            HoldAction::Warn => {
                info!("hold: power-off warning");
                let window = self
                    .timings
                    .long_press_ms
                    .saturating_add(self.timings.hibernate_cancel_ms);
                self.auto_off.extend_by(now_ms, window);
                self.draw_hibernate_warning();
                self.notify(UiEvent::HibernateWarning);
            }
            HoldAction::Cancel => {
                info!("hold: power-off cancelled");
                self.notify(UiEvent::HibernateCancel);
                self.show_alert("Power off cancelled", 1500, now_ms);
            }
            HoldAction::Shutdown => {
                info!("hold: powering off");
                self.shutdown(false);
            }
        }
    }

    fn draw_hibernate_warning(&mut self) {
        let Some(display) = self.display.as_mut() else {
            return;
        };
        if !display.is_on() {
            display.turn_on();
        }
        let mid = display.width() / 2;
        display.start_frame(Color::Dark);
        display.set_text_size(1);
        display.set_color(Color::Yellow);
        display.draw_text_centered(mid, 15, "Release to POWER OFF");
        display.draw_text_centered(mid, 26, "...");
        display.draw_text_centered(mid, 40, "or hold to CANCEL");
        if let Err(err) = display.end_frame() {
            warn!("hold warning not presented: {:?}", err);
        }
    }

    /// Let the buzzer finish (bounded), then reboot or power everything down
    pub fn shutdown(&mut self, restart: bool) {
        let started = self.platform.uptime_ms();
        loop {
            let playing = self.platform.buzzer().is_some_and(|b| b.is_playing());
            let waited = self.platform.uptime_ms().wrapping_sub(started);
            if !playing || waited >= self.timings.shutdown_audio_wait_ms {
                break;
            }
            if let Some(buzzer) = self.platform.buzzer() {
                buzzer.service();
            }
        }
        if let Some(buzzer) = self.platform.buzzer() {
            buzzer.shutdown();
        }

        if restart {
            info!("rebooting");
            self.platform.board().reboot();
        } else {
            info!("powering off");
            if self.caps.gps && self.platform.store().prefs().gps_enabled {
                self.platform.set_gps_power(false);
            }
            if let Some(display) = self.display.as_mut() {
                display.turn_off();
            }
            self.platform.radio().power_off();
            self.platform.board().power_off();
        }
        self.halted = true;
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current
    }

    pub fn home(&self) -> &HomeScreen {
        &self.screens.home
    }

    pub fn preview(&self) -> &MessagePreviewScreen {
        &self.screens.preview
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    pub fn display_mut(&mut self) -> Option<&mut D> {
        self.display.as_mut()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn msg_count(&self) -> u32 {
        self.msg_count
    }

    pub fn is_backlight_forced(&self) -> bool {
        self.force_backlight
    }

    /// Whether the active screen consumed the last dispatched key
    pub fn last_consumed(&self) -> Option<bool> {
        self.last_consumed
    }

    /// Set once the node has been powered off or rebooted
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

fn draw_alert<D: DisplaySurface>(display: &mut D, text: &str) {
    let w = display.width();
    let y = display.height() / 3;
    let p = display.height() / 32;

    display.set_text_size(1);
    display.set_color(Color::Dark);
    display.fill_rect(p, y, w - p * 2, y);
    display.set_color(Color::Light);
    display.draw_rect(p, y, w - p * 2, y);
    display.draw_text_centered(w / 2, y + p * 3, text);
}
