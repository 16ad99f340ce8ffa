//! Test doubles for the collaborator traits

use core::cell::Cell;

use heapless::String;
use meshpanel_display::TextCanvas;
use meshpanel_hal::{Board, ButtonEvent, OutputPin};

use crate::config::{NodePrefs, UiConfig};
use crate::telemetry::LppWriter;
use crate::traits::{
    AdvertPath, Buzzer, GpsFix, InputSource, InputSources, MeshNode, ModulationParams, Platform,
    PrefsStore, RadioStatus, RtcClock, SensorManager, Vibration,
};
use crate::ui::{SplashInfo, UiTask};

#[derive(Default)]
pub struct FakeBoard {
    pub mv: u16,
    pub reboots: u32,
    pub powered_off: bool,
}

impl Board for FakeBoard {
    fn batt_milli_volts(&mut self) -> u16 {
        self.mv
    }
    fn manufacturer_name(&self) -> &str {
        "Fake"
    }
    fn reboot(&mut self) {
        self.reboots += 1;
    }
    fn power_off(&mut self) {
        self.powered_off = true;
    }
}

#[derive(Default)]
pub struct FakeClock {
    pub now: u32,
}

impl RtcClock for FakeClock {
    fn current_time(&self) -> u32 {
        self.now
    }
}

#[derive(Default)]
pub struct FakeMesh {
    pub advert_ok: bool,
    pub adverts: u32,
    pub serial: bool,
    pub rescue: bool,
    pub connected: bool,
    pub pin: u32,
    pub heard: std::vec::Vec<AdvertPath>,
}

impl MeshNode for FakeMesh {
    fn advert(&mut self) -> bool {
        self.adverts += 1;
        self.advert_ok
    }
    fn enable_serial(&mut self) {
        self.serial = true;
    }
    fn disable_serial(&mut self) {
        self.serial = false;
    }
    fn is_serial_enabled(&self) -> bool {
        self.serial
    }
    fn enter_cli_rescue(&mut self) {
        self.rescue = true;
    }
    fn has_connection(&self) -> bool {
        self.connected
    }
    fn ble_pin(&self) -> u32 {
        self.pin
    }
    fn recently_heard(&self, out: &mut [AdvertPath]) {
        for (slot, advert) in out.iter_mut().zip(self.heard.iter()) {
            *slot = advert.clone();
        }
    }
}

#[derive(Default)]
pub struct FakeRadio {
    pub off: bool,
}

impl RadioStatus for FakeRadio {
    fn noise_floor(&self) -> i16 {
        -112
    }
    fn params(&self) -> ModulationParams {
        ModulationParams {
            freq_mhz: 869.525,
            bw_khz: 250.0,
            sf: 11,
            cr: 5,
            tx_power_dbm: 22,
        }
    }
    fn power_off(&mut self) {
        self.off = true;
    }
}

pub struct FakeSensors {
    pub gps: String<4>,
    pub interval: Option<String<12>>,
    pub fix: Option<GpsFix>,
    pub temperatures: std::vec::Vec<f32>,
    pub queries: u32,
}

impl Default for FakeSensors {
    fn default() -> Self {
        let mut gps = String::new();
        let _ = gps.push('0');
        Self {
            gps,
            interval: None,
            fix: None,
            temperatures: std::vec::Vec::new(),
            queries: 0,
        }
    }
}

impl SensorManager for FakeSensors {
    fn setting(&self, name: &str) -> Option<&str> {
        match name {
            "gps" => Some(self.gps.as_str()),
            "gps_interval" => self.interval.as_deref(),
            _ => None,
        }
    }
    fn set_setting(&mut self, name: &str, value: &str) -> bool {
        match name {
            "gps" => {
                self.gps.clear();
                self.gps.push_str(value).is_ok()
            }
            "gps_interval" => {
                let mut v = String::new();
                let ok = v.push_str(value).is_ok();
                self.interval = Some(v);
                ok
            }
            _ => false,
        }
    }
    fn query(&mut self, out: &mut LppWriter) {
        self.queries += 1;
        for t in &self.temperatures {
            let _ = out.add(2, crate::telemetry::LppValue::Temperature(*t));
        }
    }
    fn location(&self) -> Option<GpsFix> {
        self.fix
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub prefs: NodePrefs,
    pub saves: u32,
}

impl PrefsStore for FakeStore {
    fn prefs(&self) -> &NodePrefs {
        &self.prefs
    }
    fn prefs_mut(&mut self) -> &mut NodePrefs {
        &mut self.prefs
    }
    fn save(&mut self) {
        self.saves += 1;
    }
}

/// Melodies "play" for a fixed number of service calls
#[derive(Default)]
pub struct FakeBuzzer {
    pub played: std::vec::Vec<&'static str>,
    pub quiet: bool,
    pub remaining: u32,
    /// Service calls each melody lasts
    pub length: u32,
    pub services: u32,
    pub shut_down: bool,
}

impl Buzzer for FakeBuzzer {
    fn play(&mut self, melody: &'static str) {
        if !self.quiet {
            self.played.push(melody);
            self.remaining = self.length;
        }
    }
    fn is_playing(&self) -> bool {
        self.remaining > 0
    }
    fn service(&mut self) {
        self.services += 1;
        self.remaining = self.remaining.saturating_sub(1);
    }
    fn shutdown(&mut self) {
        self.shut_down = true;
    }
    fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }
    fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[derive(Default)]
pub struct FakeVibration {
    pub pulses: u32,
    pub services: u32,
}

impl Vibration for FakeVibration {
    fn trigger(&mut self) {
        self.pulses += 1;
    }
    fn service(&mut self) {
        self.services += 1;
    }
}

/// Scripted button events, delivered one per source per poll
#[derive(Default)]
pub struct FakeInputs {
    pub pending: std::vec::Vec<(InputSource, ButtonEvent)>,
    pub pressed: bool,
    pub polls: u32,
}

impl InputSources for FakeInputs {
    fn poll(&mut self, source: InputSource, _now_ms: u32) -> Option<ButtonEvent> {
        self.polls += 1;
        let pos = self.pending.iter().position(|(s, _)| *s == source)?;
        Some(self.pending.remove(pos).1)
    }
    fn is_user_button_pressed(&mut self) -> bool {
        self.pressed
    }
}

#[derive(Default)]
pub struct FakeLed {
    pub high: bool,
    pub changes: u32,
}

impl OutputPin for FakeLed {
    fn set_high(&mut self) {
        self.high = true;
        self.changes += 1;
    }
    fn set_low(&mut self) {
        self.high = false;
        self.changes += 1;
    }
    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub board: FakeBoard,
    pub clock: FakeClock,
    pub mesh: FakeMesh,
    pub radio: FakeRadio,
    pub sensors: Option<FakeSensors>,
    pub store: FakeStore,
    pub buzzer: Option<FakeBuzzer>,
    pub vibration: Option<FakeVibration>,
    pub inputs: FakeInputs,
    pub led: Option<FakeLed>,
    /// Advances 10ms on every read so blocking waits terminate
    pub uptime: Cell<u32>,
    pub gps_power: Option<bool>,
}

impl Platform for FakePlatform {
    type Board = FakeBoard;
    type Clock = FakeClock;
    type Mesh = FakeMesh;
    type Radio = FakeRadio;
    type Sensors = FakeSensors;
    type Store = FakeStore;
    type Buzzer = FakeBuzzer;
    type Vibration = FakeVibration;
    type Inputs = FakeInputs;
    type Led = FakeLed;

    fn board(&mut self) -> &mut FakeBoard {
        &mut self.board
    }
    fn clock(&self) -> &FakeClock {
        &self.clock
    }
    fn mesh(&mut self) -> &mut FakeMesh {
        &mut self.mesh
    }
    fn radio(&mut self) -> &mut FakeRadio {
        &mut self.radio
    }
    fn sensors(&mut self) -> Option<&mut FakeSensors> {
        self.sensors.as_mut()
    }
    fn store(&mut self) -> &mut FakeStore {
        &mut self.store
    }
    fn buzzer(&mut self) -> Option<&mut FakeBuzzer> {
        self.buzzer.as_mut()
    }
    fn vibration(&mut self) -> Option<&mut FakeVibration> {
        self.vibration.as_mut()
    }
    fn inputs(&mut self) -> &mut FakeInputs {
        &mut self.inputs
    }
    fn status_led(&mut self) -> Option<&mut FakeLed> {
        self.led.as_mut()
    }
    fn uptime_ms(&self) -> u32 {
        let t = self.uptime.get();
        self.uptime.set(t + 10);
        t
    }
    fn set_gps_power(&mut self, on: bool) {
        self.gps_power = Some(on);
    }
}

impl FakePlatform {
    /// Battery at 3.9V, clock at 2024-03-01 21:30 UTC
    pub fn new() -> Self {
        let mut platform = Self::default();
        platform.board.mv = 3900;
        platform.clock.now = 1_709_328_600;
        platform.mesh.advert_ok = true;
        platform
    }

    pub fn with_buzzer(mut self) -> Self {
        self.buzzer = Some(FakeBuzzer {
            length: 3,
            ..Default::default()
        });
        self
    }

    pub fn with_sensors(mut self) -> Self {
        self.sensors = Some(FakeSensors::default());
        self
    }

    pub fn press(&mut self, source: InputSource, event: ButtonEvent) {
        self.inputs.pending.push((source, event));
    }
}

pub const SPLASH: SplashInfo = SplashInfo {
    title: "meshpanel",
    version: "v1.4.0-9e2d1c7",
    build_date: "18 Oct 2026",
};

pub type TestTask = UiTask<TextCanvas, FakePlatform>;

/// A task past its splash screen, started at t=0
pub fn started_task(platform: FakePlatform, config: UiConfig) -> TestTask {
    let mut task = UiTask::new(Some(TextCanvas::new(128, 64)), platform, config, SPLASH)
        .expect("valid config");
    task.begin(0);
    task.tick(0);
    task
}
