// tests/player.rs
//! Player loading, transport controls and auto-finish.

mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::{FakeBackend, RecordingSink, fast_config, sine, wait_for, wav_bytes};
use versify::PlayerError;
use versify::audio::{NOT_PLAYING, VisualizationMode};
use versify::player::{PlaybackStatus, Player};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("versify-player-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_song(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, wav_bytes(&sine(440.0, 1.0, 8000), 1, 8000)).unwrap();
    path
}

fn player() -> (Player, Arc<FakeBackend>) {
    let backend = FakeBackend::new();
    let (sink, _frames) = RecordingSink::new(32);
    (Player::new(fast_config(), backend.clone(), sink), backend)
}

#[test]
fn play_without_track_is_an_error() {
    let (mut player, _) = player();
    assert!(matches!(player.play(), Err(PlayerError::NotLoaded)));
    assert_eq!(player.status(), PlaybackStatus::Stopped);
}

#[test]
fn failed_load_leaves_nothing_loaded() {
    let dir = temp_dir("bad");
    let good = write_song(&dir, "good.wav");
    let garbage = dir.join("garbage.wav");
    std::fs::write(&garbage, b"definitely not audio").unwrap();

    let (mut player, _) = player();
    player.load(&good, None).unwrap();
    assert!(player.is_loaded());

    assert!(player.load(&garbage, None).is_err());
    assert!(!player.is_loaded());
    assert!(player.load(&dir.join("missing.wav"), None).is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn backend_failure_clears_previous_lyrics() {
    let dir = temp_dir("nodevice");
    let song = write_song(&dir, "tone.wav");
    let lrc = dir.join("tone.lrc");
    std::fs::write(&lrc, "[00:00.10]hello").unwrap();

    let (mut player, backend) = player();
    player.load(&song, Some(&lrc)).unwrap();
    assert!(player.idle_frame(32).lyrics.has_lyrics);

    backend.fail_loads(true);
    let err = player.load(&song, Some(&lrc)).unwrap_err();
    assert!(matches!(err, PlayerError::NoOutputDevice(_)));
    assert!(!player.is_loaded());

    let frame = player.idle_frame(32);
    assert_eq!(frame.progress.title, "No track loaded");
    assert!(!frame.lyrics.has_lyrics);
    assert!(matches!(player.play(), Err(PlayerError::NotLoaded)));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn decode_failure_clears_previous_lyrics() {
    let dir = temp_dir("badlyrics");
    let song = write_song(&dir, "tone.wav");
    let lrc = dir.join("tone.lrc");
    std::fs::write(&lrc, "[00:00.10]hello").unwrap();
    let garbage = dir.join("garbage.wav");
    std::fs::write(&garbage, b"definitely not audio").unwrap();

    let (mut player, _) = player();
    player.load(&song, Some(&lrc)).unwrap();
    assert!(player.load(&garbage, Some(&lrc)).is_err());
    assert!(!player.idle_frame(32).lyrics.has_lyrics);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_play_pause_stop() {
    let dir = temp_dir("transport");
    let song = write_song(&dir, "tone.wav");
    let lrc = dir.join("tone.lrc");
    std::fs::write(&lrc, "[00:00.10]hello").unwrap();

    let (mut player, backend) = player();
    player.load(&song, Some(&lrc)).unwrap();
    assert_eq!(player.track_info().map(|i| i.title.as_str()), Some("tone"));

    backend.set_position(200);
    player.play().unwrap();
    assert_eq!(player.status(), PlaybackStatus::Playing);

    assert!(player.toggle_pause());
    assert_eq!(player.status(), PlaybackStatus::Paused);
    player.play().unwrap();
    assert_eq!(player.status(), PlaybackStatus::Playing);

    player.stop();
    assert_eq!(player.status(), PlaybackStatus::Stopped);
    assert!(player.is_loaded());

    // Replaying reloads the track into the backend
    let loads = backend.count("load");
    player.play().unwrap();
    assert_eq!(backend.count("load"), loads + 1);
    player.stop();

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn natural_end_is_reaped_once() {
    let dir = temp_dir("finish");
    let song = write_song(&dir, "tone.wav");

    let (mut player, backend) = player();
    player.load(&song, None).unwrap();
    backend.set_position(100);
    player.play().unwrap();

    backend.set_position(NOT_PLAYING);
    assert!(wait_for(|| player.status() == PlaybackStatus::Finished));
    assert!(player.poll_finished());
    assert!(!player.poll_finished());
    assert_eq!(player.status(), PlaybackStatus::Stopped);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn switching_tracks_stops_then_loads_then_plays() {
    let dir = temp_dir("switch");
    let first = write_song(&dir, "a.wav");
    let second = write_song(&dir, "b.wav");

    let (mut player, backend) = player();
    player.switch_to(&first, None).unwrap();
    backend.set_position(100);
    player.switch_to(&second, None).unwrap();

    let calls = backend.calls();
    let tail: Vec<&str> = calls.iter().rev().take(3).rev().copied().collect();
    assert_eq!(tail, vec!["stop", "load", "play"]);
    assert_eq!(player.track_info().map(|i| i.title.as_str()), Some("b"));
    player.stop();

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn controls_step_and_clamp() {
    let (player, _) = player();

    assert_eq!(player.volume(), 1.0);
    assert_eq!(player.volume_up(), 1.0);
    assert_eq!(player.volume_down(), 0.9);

    assert_eq!(player.smoothing_factor(), 0.3);
    assert_eq!(player.smoothing_up(), 0.35);
    assert_eq!(player.smoothing_down(), 0.3);
    assert!(!player.set_smoothing_factor(1.2));
    assert_eq!(player.smoothing_factor(), 0.3);

    assert_eq!(player.mode(), VisualizationMode::Bars);
    assert_eq!(player.cycle_mode(), VisualizationMode::Waveform);
    assert_eq!(player.cycle_mode(), VisualizationMode::Spectrum);
    assert_eq!(player.cycle_mode(), VisualizationMode::Bars);
    player.set_mode(VisualizationMode::Spectrum);
    assert_eq!(player.mode(), VisualizationMode::Spectrum);
}

#[test]
fn idle_frame_shows_loaded_track() {
    let dir = temp_dir("idle");
    let song = write_song(&dir, "quiet.wav");

    let (mut player, _) = player();
    let empty = player.idle_frame(32);
    assert_eq!(empty.progress.title, "No track loaded");
    assert_eq!(empty.equalizer.len(), 32);

    player.load(&song, None).unwrap();
    let frame = player.idle_frame(32);
    assert_eq!(frame.progress.title, "quiet");
    assert_eq!(frame.progress.album, "Unknown Album");
    assert_eq!(frame.progress.sample_rate, Some(8000));
    assert!((frame.progress.duration_secs - 1.0).abs() < 1e-9);
    assert!(frame.equalizer.iter().all(|c| c.glyph == ' '));
    assert!(!frame.lyrics.has_lyrics);

    std::fs::remove_dir_all(&dir).ok();
}
