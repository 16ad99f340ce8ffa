//! Boot splash

use heapless::String;
use meshpanel_display::{translate_utf8_to_blocks, Color, DisplaySurface};

use super::screen::{Screen, UiContext, UiRequest};
use crate::input::Key;
use crate::traits::Platform;

/// Longest version string shown
pub const MAX_VERSION: usize = 11;

/// Firmware identity shown while booting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashInfo {
    pub title: &'static str,
    /// Full version, e.g. `v1.7.2-4f1c2a9`
    pub version: &'static str,
    pub build_date: &'static str,
}

pub struct SplashScreen {
    info: SplashInfo,
    version: String<MAX_VERSION>,
    dismiss_at: u32,
}

/// Version without its `-commit` suffix, capped at [`MAX_VERSION`]
pub fn short_version(version: &str) -> String<MAX_VERSION> {
    let base = version.split('-').next().unwrap_or(version);
    let mut out = String::new();
    for c in base.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl SplashScreen {
    pub fn new(info: SplashInfo) -> Self {
        Self {
            info,
            version: short_version(info.version),
            dismiss_at: 0,
        }
    }

    /// Restart the display period
    pub fn start(&mut self, now_ms: u32, boot_screen_ms: u32) {
        self.dismiss_at = now_ms.wrapping_add(boot_screen_ms);
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl<P: Platform> Screen<P> for SplashScreen {
    fn render(&mut self, display: &mut dyn DisplaySurface, _ctx: &mut UiContext<'_, P>) -> u32 {
        let mid = display.width() / 2;

        display.set_text_size(1);
        display.set_color(Color::Blue);
        display.draw_text_centered(mid, 3, self.info.title);

        display.set_color(Color::Light);
        display.set_text_size(2);
        display.draw_text_centered(mid, 22, &self.version);

        display.set_text_size(1);
        let date: String<32> = translate_utf8_to_blocks(self.info.build_date);
        display.draw_text_centered(mid, 42, &date);
        1000
    }

    fn handle_input(&mut self, _key: Key, _ctx: &mut UiContext<'_, P>) -> bool {
        false
    }

    fn poll(&mut self, ctx: &mut UiContext<'_, P>) {
        if (ctx.now_ms.wrapping_sub(self.dismiss_at) as i32) >= 0 {
            ctx.request(UiRequest::GotoHome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_trimmed_at_dash() {
        assert_eq!(short_version("v1.7.2-4f1c2a9").as_str(), "v1.7.2");
        assert_eq!(short_version("v1.7.2").as_str(), "v1.7.2");
        assert_eq!(short_version("v10.20.30.40.50-x").as_str(), "v10.20.30.4");
        assert_eq!(short_version("").as_str(), "");
    }
}
