// tests/app.rs
//! Key handling and auto-advance through the terminal front end.

mod common;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use common::{FakeBackend, fast_config, sine, wait_for, wav_bytes};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use versify::app::App;
use versify::audio::{NOT_PLAYING, VisualizationMode};
use versify::library::{Playlist, RepeatMode, tracks_from_files};
use versify::player::PlaybackStatus;
use versify::ui::TerminalSink;

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn songs(name: &str, count: usize) -> (PathBuf, Vec<PathBuf>) {
    let dir = std::env::temp_dir().join(format!("versify-app-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let files = (0..count)
        .map(|i| {
            let path = dir.join(format!("song{i}.wav"));
            std::fs::write(&path, wav_bytes(&sine(330.0, 1.0, 8000), 1, 8000)).unwrap();
            path
        })
        .collect();
    (dir, files)
}

fn app(files: &[PathBuf]) -> (App<TestBackend>, Arc<FakeBackend>, Arc<Mutex<TerminalSink<TestBackend>>>) {
    let backend = FakeBackend::new();
    let terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let ui = Arc::new(Mutex::new(TerminalSink::new(terminal)));
    let playlist = Playlist::new(tracks_from_files(files, std::path::Path::new("lyrics")));
    let app = App::new(fast_config(), backend.clone(), ui.clone(), playlist);
    (app, backend, ui)
}

#[test]
fn start_next_and_previous() {
    let (dir, files) = songs("nav", 3);
    let (mut app, backend, ui) = app(&files);

    app.start(None);
    assert_eq!(app.player.status(), PlaybackStatus::Playing);
    assert_eq!(app.playlist.current_index(), Some(0));

    backend.set_position(100);
    assert!(!app.on_key(key('n')));
    assert_eq!(app.playlist.current_index(), Some(1));
    assert_eq!(app.player.track_info().map(|i| i.title.as_str()), Some("song1"));

    app.on_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
    app.on_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
    assert_eq!(app.playlist.current_index(), Some(2));
    assert_eq!(ui.lock().unwrap().playlist().current, Some(2));

    assert!(app.on_key(key('q')));
    assert_eq!(app.player.status(), PlaybackStatus::Stopped);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn pause_stop_and_restart_from_keys() {
    let (dir, files) = songs("pause", 1);
    let (mut app, _backend, _ui) = app(&files);
    app.start(None);

    app.on_key(key(' '));
    assert_eq!(app.player.status(), PlaybackStatus::Paused);
    app.on_key(key('p'));
    assert_eq!(app.player.status(), PlaybackStatus::Playing);

    app.on_key(key('s'));
    assert_eq!(app.player.status(), PlaybackStatus::Stopped);
    app.on_key(key(' '));
    assert_eq!(app.player.status(), PlaybackStatus::Playing);

    app.on_key(key('q'));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn visual_and_playlist_keys() {
    let (dir, files) = songs("keys", 2);
    let (mut app, _backend, ui) = app(&files);

    app.on_key(key('v'));
    assert_eq!(app.player.mode(), VisualizationMode::Waveform);
    app.on_key(key('3'));
    assert_eq!(app.player.mode(), VisualizationMode::Spectrum);

    app.on_key(key('-'));
    assert_eq!(app.player.volume(), 0.9);
    app.on_key(key(']'));
    assert_eq!(app.player.smoothing_factor(), 0.35);

    app.on_key(key('r'));
    assert_eq!(app.playlist.repeat(), RepeatMode::All);
    assert_eq!(ui.lock().unwrap().playlist().repeat, RepeatMode::All);
    app.on_key(key('h'));
    assert!(app.playlist.is_shuffled());

    app.on_key(key('!'));
    assert!(!ui.lock().unwrap().visibility().playlist);

    app.on_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    assert_eq!(app.selected, 1);
    app.on_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    assert_eq!(app.selected, 1);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn finished_track_advances_with_repeat() {
    let (dir, files) = songs("advance", 2);
    let (mut app, backend, _ui) = app(&files);
    app.start(None);

    backend.set_position(NOT_PLAYING);
    assert!(wait_for(|| app.player.status() == PlaybackStatus::Finished));
    app.tick().unwrap();
    assert_eq!(app.playlist.current_index(), Some(1));
    assert_eq!(app.player.status(), PlaybackStatus::Playing);

    // Last track without repeat: stays stopped
    backend.set_position(NOT_PLAYING);
    assert!(wait_for(|| app.player.status() == PlaybackStatus::Finished));
    app.tick().unwrap();
    assert_eq!(app.player.status(), PlaybackStatus::Stopped);
    assert_eq!(app.playlist.current_index(), Some(1));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn idle_tick_paints_the_terminal() {
    let (dir, files) = songs("idle", 1);
    let (mut app, _backend, ui) = app(&files);
    app.tick().unwrap();

    let ui = ui.lock().unwrap();
    let text: String = ui
        .terminal()
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(text.contains("song0.wav"));
    assert!(text.contains("No track loaded"));
    std::fs::remove_dir_all(&dir).ok();
}
