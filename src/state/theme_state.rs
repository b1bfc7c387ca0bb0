//! Theme and styling state management.

use rdas::{ThemeColors, ThemeManager};

/// State related to visual theme and styling.
pub struct ThemeState {
    theme_manager: ThemeManager,
    current_theme_name: String,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current_theme_name", &self.current_theme_name)
            .finish_non_exhaustive()
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeState {
    /// Creates a new theme state with the default theme.
    pub fn new() -> Self {
        Self::with_theme("Dark".to_string())
    }

    /// Creates a new theme state with a specific theme. Unknown names fall
    /// back to the default.
    pub fn with_theme(theme_name: String) -> Self {
        let theme_manager = ThemeManager::new();
        let current_theme_name = if theme_manager.get_theme(&theme_name).is_some() {
            theme_name
        } else {
            "Dark".to_string()
        };
        Self {
            theme_manager,
            current_theme_name,
        }
    }

    // ===== Theme Queries =====

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// Colours of the current theme.
    pub fn colors(&self) -> ThemeColors {
        self.theme_manager
            .get_theme(&self.current_theme_name)
            .map(|t| t.colors.clone())
            .unwrap_or_else(|| self.theme_manager.current_theme().colors)
    }

    // ===== Theme Mutations =====

    pub fn set_theme(&mut self, theme_name: String) {
        self.current_theme_name = theme_name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(ThemeState::with_theme("Nope".into()).current_theme_name(), "Dark");
        assert_eq!(ThemeState::with_theme("Light".into()).current_theme_name(), "Light");
    }
}
