//! Colour themes for the plot viewer.
//!
//! A theme covers the egui chrome (panels, text, selection) and the plot
//! itself: background, grid, axes, the data trace and the three overlay roles
//! used by drag feedback.
//!
//! # Examples
//!
//! ```
//! use rdas::theme::ThemeManager;
//! use rdas::overlay::OverlayRole;
//!
//! let manager = ThemeManager::new();
//! let dracula = manager.get_theme("Dracula").unwrap();
//! let arrow = dracula.colors.overlay(OverlayRole::Accent);
//! assert_eq!(arrow, dracula.colors.overlay_accent);
//! ```

use egui::Color32;
use std::collections::HashMap;

use crate::overlay::OverlayRole;

/// Complete palette for the viewer.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Chrome
    pub panel_background: Color32,
    pub extreme_background: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub selection: Color32,
    pub hover: Color32,
    pub error: Color32,
    pub warning: Color32,

    // Plot
    pub plot_background: Color32,
    pub grid: Color32,
    pub axis: Color32,
    pub trace: Color32,

    // Drag feedback
    pub overlay_foreground: Color32,
    pub overlay_fill: Color32,
    pub overlay_accent: Color32,
    /// Wide stroke drawn under every overlay line.
    pub overlay_contrast: Color32,
}

impl ThemeColors {
    /// Colour for an overlay role.
    pub fn overlay(&self, role: OverlayRole) -> Color32 {
        match role {
            OverlayRole::Foreground => self.overlay_foreground,
            OverlayRole::Fill => self.overlay_fill,
            OverlayRole::Accent => self.overlay_accent,
        }
    }
}

/// A named palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

/// Registry of built-in themes and the current selection.
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme_name: String,
}

impl ThemeManager {
    /// Creates a manager holding every built-in theme, with "Dark" selected.
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        for theme in [light_theme(), dark_theme(), dracula_theme(), one_dark_pro_theme()] {
            themes.insert(theme.name.clone(), theme);
        }
        Self {
            themes,
            current_theme_name: "Dark".to_string(),
        }
    }

    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Theme names, sorted.
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// The selected theme, falling back to the built-in dark palette.
    pub fn current_theme(&self) -> Theme {
        self.themes
            .get(&self.current_theme_name)
            .cloned()
            .unwrap_or_else(dark_theme)
    }

    /// Selects a theme by name.
    pub fn set_current_theme(&mut self, name: &str) -> Result<(), String> {
        if self.themes.contains_key(name) {
            self.current_theme_name = name.to_string();
            Ok(())
        } else {
            Err(format!("Theme '{}' not found", name))
        }
    }

    /// Copies a theme's chrome colours into egui visuals.
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.window_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.extreme_background;
        visuals.faint_bg_color = colors.hover;
        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.overlay_accent;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.error_fg_color = colors.error;
        visuals.warn_fg_color = colors.warning;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Black on white, like a printed plot".to_string(),
        colors: ThemeColors {
            panel_background: Color32::from_rgb(248, 248, 248),
            extreme_background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(0, 0, 0),
            text_dim: Color32::from_rgb(120, 120, 120),
            selection: Color32::from_rgb(180, 200, 255),
            hover: Color32::from_rgb(220, 220, 220),
            error: Color32::from_rgb(200, 40, 40),
            warning: Color32::from_rgb(230, 120, 20),

            plot_background: Color32::from_rgb(255, 255, 255),
            grid: Color32::from_rgb(228, 228, 228),
            axis: Color32::from_rgb(0, 0, 0),
            trace: Color32::from_rgb(40, 100, 200),

            overlay_foreground: Color32::from_rgb(0, 0, 0),
            overlay_fill: with_alpha(Color32::from_rgb(40, 100, 200), 40),
            overlay_accent: Color32::from_rgb(200, 40, 160),
            overlay_contrast: with_alpha(Color32::from_rgb(255, 255, 255), 140),
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Light lines on a dark canvas".to_string(),
        colors: ThemeColors {
            panel_background: Color32::from_rgb(39, 39, 39),
            extreme_background: Color32::from_rgb(16, 16, 16),
            text: Color32::from_rgb(255, 255, 255),
            text_dim: Color32::from_rgb(160, 160, 160),
            selection: Color32::from_rgb(50, 80, 120),
            hover: Color32::from_rgb(70, 70, 70),
            error: Color32::from_rgb(231, 76, 60),
            warning: Color32::from_rgb(243, 156, 18),

            plot_background: Color32::from_rgb(24, 24, 24),
            grid: Color32::from_rgb(52, 52, 52),
            axis: Color32::from_rgb(200, 200, 200),
            trace: Color32::from_rgb(46, 204, 113),

            overlay_foreground: Color32::from_rgb(241, 196, 15),
            overlay_fill: with_alpha(Color32::from_rgb(52, 152, 219), 48),
            overlay_accent: Color32::from_rgb(255, 121, 198),
            overlay_contrast: with_alpha(Color32::from_rgb(0, 0, 0), 140),
        },
    }
}

/// Colours from https://draculatheme.com/spec
fn dracula_theme() -> Theme {
    Theme {
        name: "Dracula".to_string(),
        description: "Dracula palette".to_string(),
        colors: ThemeColors {
            panel_background: hex_to_color32("#282a36"),
            extreme_background: hex_to_color32("#21222c"),
            text: hex_to_color32("#f8f8f2"),
            text_dim: hex_to_color32("#6272a4"),
            selection: hex_to_color32("#44475a"),
            hover: hex_to_color32("#44475a"),
            error: hex_to_color32("#ff5555"),
            warning: hex_to_color32("#ffb86c"),

            plot_background: hex_to_color32("#21222c"),
            grid: hex_to_color32("#343746"),
            axis: hex_to_color32("#f8f8f2"),
            trace: hex_to_color32("#8be9fd"),

            overlay_foreground: hex_to_color32("#f1fa8c"),
            overlay_fill: with_alpha(hex_to_color32("#bd93f9"), 48),
            overlay_accent: hex_to_color32("#ff79c6"),
            overlay_contrast: with_alpha(hex_to_color32("#000000"), 140),
        },
    }
}

/// Colours from https://github.com/Binaryify/OneDark-Pro
fn one_dark_pro_theme() -> Theme {
    Theme {
        name: "One Dark Pro".to_string(),
        description: "One Dark Pro palette".to_string(),
        colors: ThemeColors {
            panel_background: hex_to_color32("#282c34"),
            extreme_background: hex_to_color32("#21252b"),
            text: hex_to_color32("#abb2bf"),
            text_dim: hex_to_color32("#5c6370"),
            selection: hex_to_color32("#4b5263"),
            hover: hex_to_color32("#4b5263"),
            error: hex_to_color32("#e06c75"),
            warning: hex_to_color32("#d19a66"),

            plot_background: hex_to_color32("#21252b"),
            grid: hex_to_color32("#2c313a"),
            axis: hex_to_color32("#abb2bf"),
            trace: hex_to_color32("#61afef"),

            overlay_foreground: hex_to_color32("#e5c07b"),
            overlay_fill: with_alpha(hex_to_color32("#56b6c2"), 48),
            overlay_accent: hex_to_color32("#c678dd"),
            overlay_contrast: with_alpha(hex_to_color32("#000000"), 140),
        },
    }
}

/// Converts `#rrggbb` to a colour; anything else yields black.
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color32::BLACK;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    Color32::from_rgb(channel(0), channel(2), channel(4))
}

/// The same colour with the given alpha (unmultiplied).
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes_listed() {
        let m = ThemeManager::new();
        assert_eq!(m.list_themes(), vec!["Dark", "Dracula", "Light", "One Dark Pro"]);
        assert_eq!(m.current_theme().name, "Dark");
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let mut m = ThemeManager::new();
        assert!(m.set_current_theme("Solarized").is_err());
        assert!(m.set_current_theme("Light").is_ok());
        assert_eq!(m.current_theme_name(), "Light");
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_to_color32("#ff8000"), Color32::from_rgb(255, 128, 0));
        assert_eq!(hex_to_color32("nope"), Color32::BLACK);
    }
}
