//! UI surface that reports to the log instead of a page.

use meetgate_access::{Banner, Surface, UiSurface};
use tracing::{info, warn};

/// Logs every surface change and remembers what is visible.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    visible: Option<Surface>,
    display_name: Option<String>,
}

impl ConsoleSurface {
    /// Returns the surface last shown.
    #[must_use]
    pub fn visible(&self) -> Option<Surface> {
        self.visible
    }

    /// Returns the display name handed to the conference UI.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

impl UiSurface for ConsoleSurface {
    fn show_gated_ui(&mut self) {
        info!("conference visible");
        self.visible = Some(Surface::Gated);
    }

    fn hide_gated_ui(&mut self) {
        if self.visible == Some(Surface::Gated) {
            self.visible = None;
        }
    }

    fn show_auth_ui(&mut self) {
        info!("sign-in page visible");
        self.visible = Some(Surface::SignIn);
    }

    fn hide_auth_ui(&mut self) {
        if self.visible == Some(Surface::SignIn) {
            self.visible = None;
        }
    }

    fn show_banner(&mut self, banner: &Banner) {
        warn!(kind = ?banner.kind(), "{}", banner.message());
    }

    fn hide_banner(&mut self) {}

    fn set_display_name(&mut self, name: &str) {
        info!(name, "display name set");
        self.display_name = Some(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_visible_surface() {
        let mut surface = ConsoleSurface::default();

        surface.hide_auth_ui();
        surface.show_gated_ui();
        assert_eq!(surface.visible(), Some(Surface::Gated));

        surface.hide_gated_ui();
        surface.show_auth_ui();
        assert_eq!(surface.visible(), Some(Surface::SignIn));
    }

    #[test]
    fn hiding_other_surface_keeps_visible_one() {
        let mut surface = ConsoleSurface::default();
        surface.show_auth_ui();

        surface.hide_gated_ui();

        assert_eq!(surface.visible(), Some(Surface::SignIn));
    }

    #[test]
    fn remembers_display_name() {
        let mut surface = ConsoleSurface::default();
        surface.set_display_name("Alice");
        assert_eq!(surface.display_name(), Some("Alice"));
    }
}
