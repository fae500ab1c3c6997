// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::audio::VisualizationMode;

/// Map digit/shifted-digit keys to a number (1..3).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    if let KeyCode::Char(c) = k.code {
        match c {
            '1' | '!' => Some(1),
            '2' | '@' => Some(2),
            '3' | '#' => Some(3),
            _ => None,
        }
    } else {
        None
    }
}

/// Check if the key event is a shifted symbol (!, @, #).
pub fn is_shifted_symbol(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('!') | KeyCode::Char('@') | KeyCode::Char('#')
    )
}

/// Player actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Up,
    Down,
    PlaySelected,
    TogglePause,
    Stop,
    NextTrack,
    PreviousTrack,
    CycleMode,
    SelectMode(VisualizationMode),
    VolumeUp,
    VolumeDown,
    SmoothingUp,
    SmoothingDown,
    CycleRepeat,
    ToggleShuffle,
    ToggleSection(usize),
    Quit,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> Action {
    // Shift+digit toggles a section, a bare digit picks a mode
    if let Some(d) = map_key_to_digit(key) {
        if key.modifiers.contains(KeyModifiers::SHIFT) || is_shifted_symbol(key) {
            return Action::ToggleSection(d);
        }
        return Action::SelectMode(VisualizationMode::ALL[d - 1]);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Down => Action::Down,
        KeyCode::Up => Action::Up,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::TogglePause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('n') | KeyCode::Right => Action::NextTrack,
        KeyCode::Char('b') | KeyCode::Left => Action::PreviousTrack,
        KeyCode::Char('v') => Action::CycleMode,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::VolumeUp,
        KeyCode::Char('-') => Action::VolumeDown,
        KeyCode::Char(']') => Action::SmoothingUp,
        KeyCode::Char('[') => Action::SmoothingDown,
        KeyCode::Char('r') => Action::CycleRepeat,
        KeyCode::Char('h') => Action::ToggleShuffle,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}
