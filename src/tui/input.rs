//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::DisplayConfig;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Write the effective configuration to disk.
    SaveConfig,
}

/// Handles one key event. Section toggles mutate the config in place;
/// unrecognized keys are ignored.
pub fn handle_key(config: &mut DisplayConfig, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('c') => {
            config.show_system_info = !config.show_system_info;
            KeyAction::None
        }
        KeyCode::Char('w') => KeyAction::SaveConfig,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut config = DisplayConfig::default();
        assert_eq!(handle_key(&mut config, key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key(&mut config, key(KeyCode::Char('Q'))), KeyAction::Quit);
        assert_eq!(
            handle_key(
                &mut config,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            KeyAction::Quit
        );
    }

    #[test]
    fn toggle_flips_system_info_in_place() {
        let mut config = DisplayConfig::default();
        assert!(config.show_system_info);

        assert_eq!(handle_key(&mut config, key(KeyCode::Char('c'))), KeyAction::None);
        assert!(!config.show_system_info);

        assert_eq!(handle_key(&mut config, key(KeyCode::Char('c'))), KeyAction::None);
        assert!(config.show_system_info);
    }

    #[test]
    fn save_key_requests_config_write() {
        let mut config = DisplayConfig::default();
        assert_eq!(
            handle_key(&mut config, key(KeyCode::Char('w'))),
            KeyAction::SaveConfig
        );
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut config = DisplayConfig::default();
        let before = config.clone();
        assert_eq!(handle_key(&mut config, key(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handle_key(&mut config, key(KeyCode::Esc)), KeyAction::None);
        assert_eq!(handle_key(&mut config, key(KeyCode::Enter)), KeyAction::None);
        assert_eq!(config, before);
    }
}
