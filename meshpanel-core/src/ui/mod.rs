//! User interface
//!
//! [`UiTask`] owns the display, the screens and the UI state machines and is
//! driven by a periodic [`UiTask::tick`]. Screens draw through
//! [`DisplaySurface`](meshpanel_display::DisplaySurface) and reach the rest
//! of the node through a per-call [`UiContext`].

pub mod format;
pub mod home;
pub mod preview;
pub mod screen;
pub mod splash;
pub mod task;

pub use home::{HomeScreen, Page};
pub use preview::{MessagePreviewScreen, PreviewEntry};
pub use screen::{Screen, ScreenId, UiContext, UiRequest};
pub use splash::{SplashInfo, SplashScreen};
pub use task::{Screens, UiTask};
