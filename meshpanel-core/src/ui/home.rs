//! Home screen
//!
//! A carousel of status pages plus a screensaver mode. The page set is fixed
//! at startup from the board capabilities:
//!
//! ```text
//! Overview -> RecentContacts -> RadioStatus -> [Gps] -> [Sensors] -> Clock -> (wrap)
//! ```
//!
//! Repeater builds replace the carousel with one status page.
//!
//! The screensaver is a pseudo-page that remembers which real page to
//! resume, so leaving it always lands where the user was.

use heapless::{String, Vec};
use meshpanel_display::{translate_utf8_to_blocks, Color, DisplaySurface};
use meshpanel_hal::Board;

use super::format::{self, age_label, clock_hm, date_dmy};
use super::screen::{Screen, UiContext, UiRequest};
use crate::config::{BoardCapabilities, DisplayTech, MAX_NODE_NAME, MAX_RECENT};
use crate::input::Key;
use crate::state::is_after;
use crate::telemetry::{LppReader, LppValue, LppWriter, TELEM_CHANNEL_SELF};
use crate::traits::{
    AdvertPath, MeshNode, Platform, PrefsStore, RadioStatus, SensorManager, UiEvent,
};

/// Most pages a board can have
pub const MAX_PAGES: usize = 6;

/// Sensor re-query interval with auto-off enabled
const SENSORS_REFRESH_MS: u32 = 5000;
/// Sensor re-query interval on always-on (usually e-ink) panels
const SENSORS_REFRESH_SLOW_MS: u32 = 60_000;

/// 8x8 crossed-speaker glyph, XBM
const MUTED_ICON: [u8; 8] = [0x08, 0x4c, 0x2f, 0x1f, 0x1f, 0x2f, 0x4c, 0x08];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    Overview,
    RecentContacts,
    RadioStatus,
    Gps,
    Sensors,
    Clock,
    RepeaterStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Page(usize),
    Screensaver { resume: usize },
}

pub struct HomeScreen {
    pages: Vec<Page, MAX_PAGES>,
    cursor: Cursor,
    show_volt: bool,
    recent: [AdvertPath; MAX_RECENT],
    sensors: LppWriter,
    sensors_count: usize,
    sensors_offset: usize,
    next_sensors_refresh: Option<u32>,
}

/// Pages available on a board, in carousel order
pub fn pages_for(caps: &BoardCapabilities) -> Vec<Page, MAX_PAGES> {
    let mut pages = Vec::new();
    if caps.repeater_status {
        let _ = pages.push(Page::RepeaterStatus);
        return pages;
    }
    let wanted = [
        (Page::Overview, true),
        (Page::RecentContacts, true),
        (Page::RadioStatus, true),
        (Page::Gps, caps.gps),
        (Page::Sensors, caps.sensors_page),
        (Page::Clock, true),
    ];
    for (page, fitted) in wanted {
        if fitted {
            // At most MAX_PAGES candidates
            let _ = pages.push(page);
        }
    }
    pages
}

impl HomeScreen {
    pub fn new(caps: &BoardCapabilities) -> Self {
        Self {
            pages: pages_for(caps),
            cursor: Cursor::Page(0),
            show_volt: false,
            recent: core::array::from_fn(|_| AdvertPath::default()),
            sensors: LppWriter::new(),
            sensors_count: 0,
            sensors_offset: 0,
            next_sensors_refresh: None,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Current page, `None` while the screensaver runs
    pub fn page(&self) -> Option<Page> {
        match self.cursor {
            Cursor::Page(i) => self.pages.get(i).copied(),
            Cursor::Screensaver { .. } => None,
        }
    }

    pub fn page_index(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Page(i) => Some(i),
            Cursor::Screensaver { .. } => None,
        }
    }

    pub fn is_on_first_page(&self) -> bool {
        self.cursor == Cursor::Page(0)
    }

    pub fn is_screensaver(&self) -> bool {
        matches!(self.cursor, Cursor::Screensaver { .. })
    }

    pub fn enter_screensaver(&mut self) {
        if let Cursor::Page(resume) = self.cursor {
            debug!("screensaver on, resume page {}", resume);
            self.cursor = Cursor::Screensaver { resume };
        }
    }

    pub fn leave_screensaver(&mut self) {
        if let Cursor::Screensaver { resume } = self.cursor {
            debug!("screensaver off");
            self.cursor = Cursor::Page(resume);
        }
    }

    /// Overview shows the battery in volts instead of percent
    pub fn show_volt(&self) -> bool {
        self.show_volt
    }

    /// Force a sensor re-query on the next render
    pub fn invalidate_sensors(&mut self) {
        self.next_sensors_refresh = None;
    }

    fn rotate(&mut self, forward: bool) -> usize {
        let n = self.pages.len();
        let i = match self.cursor {
            Cursor::Page(i) => i,
            Cursor::Screensaver { resume } => resume,
        };
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        self.cursor = Cursor::Page(next);
        next
    }

    fn render_header<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        let w = display.width();
        let mv = ctx.platform.board().batt_milli_volts();
        let pct = ctx.caps.battery.percent(mv) as i32;
        let quiet = ctx.buzzer_quiet();

        display.set_text_size(1);
        display.set_color(Color::Green);

        const ICON_W: i32 = 24;
        const ICON_H: i32 = 10;
        let icon_x = w - ICON_W - 5;
        display.draw_rect(icon_x, 0, ICON_W, ICON_H);
        display.fill_rect(icon_x + ICON_W, ICON_H / 4, 3, ICON_H / 2);
        display.fill_rect(icon_x + 2, 2, pct * (ICON_W - 4) / 100, ICON_H - 4);

        let mut left = icon_x;
        if quiet {
            left -= 9;
            display.draw_bitmap(left, 1, &MUTED_ICON, 8, 8);
        }

        let level: String<8> = if self.show_volt {
            format::text(format_args!("{}.{:02}V", mv / 1000, (mv % 1000) / 10))
        } else {
            format::text(format_args!("{}%", pct))
        };
        let level_x = left - 2 - display.text_width(&level);
        display.draw_text_left_align(level_x, 1, &level);

        let name: String<{ MAX_NODE_NAME * 3 }> =
            translate_utf8_to_blocks(&ctx.platform.store().prefs().node_name);
        display.draw_text_ellipsized(0, 1, level_x - 2, &name);
    }

    fn render_dots(&self, display: &mut dyn DisplaySurface, current: usize) {
        let n = self.pages.len() as i32;
        let y = 14;
        let mut x = display.width() / 2 - 5 * (n - 1);
        for i in 0..self.pages.len() {
            if i == current {
                display.fill_rect(x - 1, y - 1, 3, 3);
            } else {
                display.fill_rect(x, y, 1, 1);
            }
            x += 10;
        }
    }

    fn render_overview<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        let mid = display.width() / 2;
        display.set_color(Color::Yellow);
        display.set_text_size(2);
        let msgs: String<16> = format::text(format_args!("MSG: {}", ctx.msg_count));
        display.draw_text_centered(mid, 20, &msgs);

        let mesh = ctx.platform.mesh();
        if mesh.has_connection() {
            display.set_color(Color::Green);
            display.set_text_size(1);
            display.draw_text_centered(mid, 43, "< Connected >");
        } else if mesh.ble_pin() != 0 {
            display.set_color(Color::Red);
            let pin: String<16> = format::text(format_args!("Pin:{}", mesh.ble_pin()));
            display.draw_text_centered(mid, 43, &pin);
        }
        display.set_text_size(1);
    }

    fn render_recent<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        let slots = ctx.timings.recent_list_size.min(MAX_RECENT);
        for slot in self.recent.iter_mut() {
            *slot = AdvertPath::default();
        }
        ctx.platform.mesh().recently_heard(&mut self.recent[..slots]);
        let now = ctx.now_secs();
        let w = display.width();

        display.set_text_size(1);
        display.set_color(Color::Green);
        if self.recent[..slots].iter().all(AdvertPath::is_empty) {
            display.draw_text_centered(w / 2, 30, "No adverts received");
            return;
        }

        let mut y = 20;
        for advert in &self.recent[..slots] {
            if !advert.is_empty() {
                let age = age_label(now, advert.recv_timestamp);
                let age_w = display.text_width(&age);
                let name: String<{ crate::traits::mesh::MAX_CONTACT_NAME * 3 }> =
                    translate_utf8_to_blocks(&advert.name);
                display.draw_text_ellipsized(0, y, w - age_w - 1, &name);
                display.set_cursor(w - age_w - 1, y);
                display.print(&age);
            }
            y += 11;
        }
    }

    fn render_radio<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        let radio = ctx.platform.radio();
        let params = radio.params();
        let noise = radio.noise_floor();

        display.set_color(Color::Yellow);
        display.set_text_size(1);
        let lines: [String<32>; 4] = [
            format::text(format_args!("FQ: {:06.3}   SF: {}", params.freq_mhz, params.sf)),
            format::text(format_args!("BW: {:03.2}     CR: {}", params.bw_khz, params.cr)),
            format::text(format_args!("TX: {}dBm", params.tx_power_dbm)),
            format::text(format_args!("Noise floor: {}dB", noise)),
        ];
        for (i, line) in lines.iter().enumerate() {
            display.set_cursor(0, 20 + 11 * i as i32);
            display.print(line);
        }
    }

    fn render_gps<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        let w = display.width();
        let enabled = ctx.gps_enabled();
        let state = match (enabled, ctx.platform.gps_switch_state()) {
            (true, Some(false)) => "gps off(hw)",
            (false, Some(true)) => "gps off(sw)",
            (true, _) => "gps on",
            (false, _) => "gps off",
        };

        display.set_text_size(1);
        display.set_color(Color::Light);
        let mut y = 18;
        display.draw_text_left_align(0, y, state);

        let fix = ctx.platform.sensors().and_then(|s| s.location());
        let Some(fix) = fix else {
            display.draw_text_left_align(0, y + 12, "Can't access GPS");
            return;
        };

        display.draw_text_right_align(w - 1, y, if fix.valid { "fix" } else { "no fix" });
        let rows: [(&str, String<32>); 3] = [
            ("sat", format::text(format_args!("{}", fix.satellites))),
            (
                "pos",
                format::text(format_args!(
                    "{:.4} {:.4}",
                    fix.lat_e6 as f64 / 1_000_000.0,
                    fix.lon_e6 as f64 / 1_000_000.0
                )),
            ),
            ("alt", format::text(format_args!("{:.2}", fix.alt_mm as f64 / 1000.0))),
        ];
        for (label, value) in rows.iter() {
            y += 12;
            display.draw_text_left_align(0, y, label);
            display.draw_text_right_align(w - 1, y, value);
        }
    }

    fn refresh_sensors<P: Platform>(&mut self, ctx: &mut UiContext<'_, P>) {
        if let Some(next) = self.next_sensors_refresh {
            if !is_after(ctx.now_ms, next) {
                return;
            }
        }

        self.sensors.reset();
        let mv = ctx.platform.board().batt_milli_volts();
        if self.sensors.add_voltage(TELEM_CHANNEL_SELF, mv as f32 / 1000.0).is_err() {
            warn!("battery telemetry not encoded");
        }
        if let Some(sensors) = ctx.platform.sensors() {
            sensors.query(&mut self.sensors);
        }
        self.sensors_count = self.sensors.reader().count();
        if self.sensors_offset >= self.sensors_count {
            self.sensors_offset = 0;
        }

        let interval = if ctx.timings.auto_off_enabled() {
            SENSORS_REFRESH_MS
        } else {
            SENSORS_REFRESH_SLOW_MS
        };
        self.next_sensors_refresh = Some(ctx.now_ms.wrapping_add(interval));
        trace!("sensors refreshed, {} records", self.sensors_count);
    }

    fn render_sensors<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        self.refresh_sensors(ctx);

        let w = display.width();
        let slots = ctx.timings.recent_list_size;
        let scroll = self.sensors_count > slots;
        let rows = if scroll { slots } else { self.sensors_count };

        display.set_text_size(1);
        display.set_color(Color::Light);

        let mut reader = LppReader::new(self.sensors.as_bytes());
        for _ in 0..self.sensors_offset {
            reader.next();
        }

        let mut y = 18;
        for _ in 0..rows {
            let record = match reader.next() {
                Some(record) => record,
                None => {
                    reader.reset();
                    match reader.next() {
                        Some(record) => record,
                        None => break,
                    }
                }
            };
            let value: String<32> = match record.value {
                LppValue::Gps { lat, lon, .. } => format::text(format_args!("{:.4} {:.4}", lat, lon)),
                LppValue::Voltage(v) => format::text(format_args!("{:.2}", v)),
                LppValue::Current(v) => format::text(format_args!("{:.3}", v)),
                LppValue::Temperature(v) => format::text(format_args!("{:.2}", v)),
                LppValue::Humidity(v) | LppValue::Pressure(v) => {
                    format::text(format_args!("{:.1}", v))
                }
                LppValue::Altitude(v) | LppValue::Power(v) => format::text(format_args!("{:.0}", v)),
            };
            display.draw_text_left_align(0, y, record.value.label());
            display.draw_text_right_align(w - 1, y, &value);
            y += 12;
        }

        self.sensors_offset = if scroll {
            (self.sensors_offset + 1) % self.sensors_count
        } else {
            0
        };
    }

    fn render_clock<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        let mid = display.width() / 2;
        let now = ctx.now_secs();
        let offset = ctx.timings.timezone_offset_s;
        let (size, y) = if ctx.caps.display_tech == DisplayTech::Tft {
            (2, 26)
        } else {
            (4, 21)
        };

        display.set_color(Color::Light);
        display.set_text_size(size);
        display.draw_text_centered(mid, y, &clock_hm(now, offset));
        display.set_text_size(1);
        display.draw_text_centered(mid, 54, &date_dmy(now, offset));
    }

    fn render_repeater<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) {
        let w = display.width();
        let mid = w / 2;
        let now = ctx.now_secs();
        let offset = ctx.timings.timezone_offset_s;

        display.set_text_size(1);
        display.set_color(Color::Light);
        let stamp: String<32> = format::text(format_args!(
            "{} {}",
            clock_hm(now, offset),
            date_dmy(now, offset)
        ));
        display.draw_text_left_align(2, 3, &stamp);

        display.draw_rect(1, 13, w - 2, 1);
        display.set_color(Color::Green);
        let name: String<{ MAX_NODE_NAME * 3 }> =
            translate_utf8_to_blocks(&ctx.platform.store().prefs().node_name);
        display.draw_text_centered(mid, 17, &name);
        display.set_color(Color::Light);
        display.draw_rect(1, 27, w - 2, 1);

        let radio = ctx.platform.radio();
        let params = radio.params();
        let noise = radio.noise_floor();
        display.set_color(Color::Yellow);
        let lines: [(i32, String<32>); 3] = [
            (33, format::text(format_args!("FREQ:{:06.3} SF:{}", params.freq_mhz, params.sf))),
            (43, format::text(format_args!("BW:{:03.2} CR:{}", params.bw_khz, params.cr))),
            (53, format::text(format_args!("Noise floor: {}dB", noise))),
        ];
        for (y, line) in lines.iter() {
            display.draw_text_centered(mid, *y, line);
        }

        const ICON_W: i32 = 24;
        const ICON_H: i32 = 7;
        let mv = ctx.platform.board().batt_milli_volts();
        let pct = ctx.caps.battery.percent(mv) as i32;
        let icon_x = w - ICON_W - 2;
        display.set_color(Color::Green);
        display.draw_rect(icon_x, 3, ICON_W, ICON_H);
        display.fill_rect(icon_x + 1, 4, pct * (ICON_W - 2) / 100, ICON_H - 2);
    }

    fn render_screensaver<P: Platform>(
        &mut self,
        display: &mut dyn DisplaySurface,
        ctx: &mut UiContext<'_, P>,
    ) -> u32 {
        let dimmed = ctx.platform.store().prefs().screensaver_dimmed;
        display.set_contrast(if dimmed { 1 } else { 255 });

        let mid = display.width() / 2;
        let now = ctx.now_secs();
        let offset = ctx.timings.timezone_offset_s;
        let (size, y, date_y) = if ctx.caps.display_tech == DisplayTech::Tft {
            (2, 13, 41)
        } else {
            (4, 11, 48)
        };

        display.set_color(Color::Light);
        display.set_text_size(size);
        display.draw_text_centered(mid, y, &clock_hm(now, offset));
        display.set_text_size(1);
        display.draw_text_centered(mid, date_y, &date_dmy(now, offset));
        1000
    }
}

impl<P: Platform> Screen<P> for HomeScreen {
    fn render(&mut self, display: &mut dyn DisplaySurface, ctx: &mut UiContext<'_, P>) -> u32 {
        let index = match self.cursor {
            Cursor::Screensaver { .. } => return self.render_screensaver(display, ctx),
            Cursor::Page(i) => i,
        };

        display.set_contrast(255);
        if self.pages[index] == Page::RepeaterStatus {
            self.render_repeater(display, ctx);
            return 5000;
        }
        self.render_header(display, ctx);
        self.render_dots(display, index);

        match self.pages[index] {
            Page::Overview => self.render_overview(display, ctx),
            Page::RecentContacts => {
                self.render_recent(display, ctx);
                // Ages tick in seconds
                return 1000;
            }
            Page::RadioStatus => self.render_radio(display, ctx),
            Page::Gps => self.render_gps(display, ctx),
            Page::Sensors => self.render_sensors(display, ctx),
            Page::Clock => self.render_clock(display, ctx),
            Page::RepeaterStatus => {}
        }
        5000
    }

    fn handle_input(&mut self, key: Key, ctx: &mut UiContext<'_, P>) -> bool {
        if self.is_screensaver() {
            if key == Key::Enter {
                let prefs = ctx.platform.store().prefs_mut();
                prefs.screensaver_dimmed = !prefs.screensaver_dimmed;
                ctx.platform.store().save();
            } else {
                self.leave_screensaver();
            }
            return true;
        }

        match key {
            Key::Left | Key::Prev => {
                self.rotate(false);
                true
            }
            Key::Next | Key::Right => {
                let index = self.rotate(true);
                if self.pages[index] == Page::RecentContacts {
                    ctx.alert(ctx.caps.send_hint(), 1000);
                }
                true
            }
            Key::Enter if ctx.display_on => self.handle_enter(ctx),
            _ => false,
        }
    }
}

impl HomeScreen {
    fn handle_enter<P: Platform>(&mut self, ctx: &mut UiContext<'_, P>) -> bool {
        let Some(page) = self.page() else {
            return false;
        };
        match page {
            Page::Overview => self.show_volt = !self.show_volt,
            Page::RadioStatus => {
                let mesh = ctx.platform.mesh();
                if mesh.is_serial_enabled() {
                    mesh.disable_serial();
                    ctx.alert("Bluetooth OFF", 1000);
                } else {
                    mesh.enable_serial();
                    ctx.alert("Bluetooth ON", 1000);
                }
            }
            Page::RecentContacts => {
                ctx.notify(UiEvent::Ack);
                if ctx.platform.mesh().advert() {
                    ctx.alert("Advert sent!", 1000);
                } else {
                    ctx.alert("Advert failed..", 1000);
                }
            }
            Page::Gps => ctx.request(UiRequest::ToggleGps),
            Page::Sensors => {
                ctx.request(UiRequest::ToggleGps);
                self.invalidate_sensors();
            }
            Page::Clock => ctx.request(UiRequest::ToggleScreensaver),
            Page::RepeaterStatus => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn caps(gps: bool, sensors: bool) -> BoardCapabilities {
        BoardCapabilities {
            gps,
            sensors_page: sensors,
            ..Default::default()
        }
    }

    #[test]
    fn test_page_sets() {
        assert_eq!(
            pages_for(&caps(false, false)).as_slice(),
            &[Page::Overview, Page::RecentContacts, Page::RadioStatus, Page::Clock]
        );
        assert_eq!(pages_for(&caps(true, true)).len(), 6);
        assert_eq!(pages_for(&caps(false, true))[3], Page::Sensors);

        let repeater = BoardCapabilities {
            repeater_status: true,
            gps: true,
            ..Default::default()
        };
        assert_eq!(pages_for(&repeater).as_slice(), &[Page::RepeaterStatus]);
    }

    #[test]
    fn test_single_page_rotation_stays_put() {
        let mut home = HomeScreen::new(&BoardCapabilities {
            repeater_status: true,
            ..Default::default()
        });
        assert_eq!(home.rotate(true), 0);
        assert_eq!(home.rotate(false), 0);
        assert!(home.is_on_first_page());
    }

    #[test]
    fn test_wrap_both_ways() {
        let mut home = HomeScreen::new(&caps(true, false));
        assert_eq!(home.rotate(false), 4);
        assert_eq!(home.page(), Some(Page::Clock));
        assert_eq!(home.rotate(true), 0);
    }

    #[test]
    fn test_screensaver_remembers_page() {
        let mut home = HomeScreen::new(&caps(false, false));
        home.rotate(true);
        home.rotate(true);
        home.enter_screensaver();
        assert!(home.is_screensaver());
        assert_eq!(home.page(), None);
        // Entering twice keeps the original resume page
        home.enter_screensaver();
        home.leave_screensaver();
        assert_eq!(home.page(), Some(Page::RadioStatus));
    }

    proptest! {
        #[test]
        fn prop_rotation_stays_in_range(
            gps in any::<bool>(),
            sensors in any::<bool>(),
            moves in proptest::collection::vec(any::<bool>(), 0..64),
        ) {
            let mut home = HomeScreen::new(&caps(gps, sensors));
            let n = home.pages().len() as i64;
            let mut expected: i64 = 0;
            for forward in moves {
                let index = home.rotate(forward);
                expected = (expected + if forward { 1 } else { -1 }).rem_euclid(n);
                prop_assert!(index < home.pages().len());
                prop_assert_eq!(index as i64, expected);
            }
        }

        #[test]
        fn prop_screensaver_resumes_prior_page(steps in 0usize..20) {
            let mut home = HomeScreen::new(&caps(true, true));
            for _ in 0..steps {
                home.rotate(true);
            }
            let before = home.page_index();
            home.enter_screensaver();
            home.leave_screensaver();
            prop_assert_eq!(home.page_index(), before);
        }
    }
}
