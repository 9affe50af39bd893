//! Loading fixtures and replaying them through the public API.

use termreel::{
    repeat, replay, CursorStyle, LoadError, ParseError, Pacing, Player, Repeat, Session, Timing,
};

use crate::helpers::{fixture, load_fixture, temp_fixture};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn demo_fixture_loads_all_records() {
    let session = Session::load(fixture("demo.yml")).unwrap();

    assert_eq!(session.len(), 3);
    assert_eq!(session.config().frame_delay, Timing::Auto);
    assert_eq!(session.config().max_idle_time, Timing::Millis(2000));
    assert_eq!(session.config().repeat, Repeat::Times(2));
    assert_eq!(session.config().cursor_style, CursorStyle::Block);
}

#[test]
fn demo_fixture_keeps_style_fields() {
    let session = Session::load(fixture("demo.yml")).unwrap();
    let config = session.config();

    let theme = config.theme().expect("theme should be preserved");
    assert_eq!(theme["red"].as_str(), Some("#fc4384"));
    assert_eq!(config.frame_box().unwrap()["title"].as_str(), Some("Demo"));
    assert!(config.watermark().unwrap()["imagePath"].is_null());
    assert_eq!(config.style["command"].as_str(), Some("bash -l"));
    assert_eq!(config.style["fontSize"].as_u64(), Some(12));
}

#[test]
fn load_from_temp_copy_matches_in_memory_parse() {
    let (temp_dir, path) = temp_fixture("demo.yml");
    let from_disk = Session::load(&path).unwrap();
    let from_str = Session::from_yaml(&load_fixture("demo.yml")).unwrap();

    assert_eq!(from_disk, from_str);
    drop(temp_dir);
}

#[test]
fn missing_records_fixture_fails_to_parse() {
    let err = Session::load(fixture("missing_records.yml")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Parse(ParseError::MissingKey("records"))
    ));
}

#[test]
fn negative_delay_fixture_fails_to_parse() {
    let err = Session::load(fixture("negative_delay.yml")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Parse(ParseError::NegativeDelay {
            index: 1,
            delay: -250
        })
    ));
}

#[test]
fn bad_cols_fixture_is_a_config_error() {
    let err = Session::load(fixture("bad_cols.yml")).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("cols"));
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn demo_replay_clamps_idle_gap() {
    let session = Session::load(fixture("demo.yml")).unwrap();
    let offsets: Vec<u64> = replay(&session).map(|c| c.offset_ms).collect();
    assert_eq!(offsets, vec![120, 2120, 2200]);
}

#[test]
fn demo_repeat_from_config_plays_twice() {
    let session = Session::load(fixture("demo.yml")).unwrap();
    let chunks: Vec<_> = repeat(&session, session.config().repeat).collect();

    assert_eq!(chunks.len(), 6);
    assert_eq!(chunks[3].offset_ms, 2200 + 120);
    assert_eq!(chunks[0].content, chunks[3].content);
}

#[test]
fn real_timing_restores_long_pause() {
    let session = Session::load(fixture("demo.yml")).unwrap();
    let last = session
        .replay_with(Pacing::recorded())
        .last()
        .map(|c| c.offset_ms);
    assert_eq!(last, Some(5200));
}

#[test]
fn player_reproduces_content_bytes() {
    let session = Session::load(fixture("demo.yml")).unwrap();
    let mut player = Player::new(Vec::new());

    // zero factor: no waiting, same order
    let outcome = player
        .play(session.replay_with(Pacing::from_config(session.config()).speed_factor(0.0)))
        .unwrap();

    assert_eq!(outcome.chunks(), 3);
    assert_eq!(
        player.into_inner(),
        b"\x1b[1;32m$\x1b[0m ls\r\nREADME.md  demo.yml\r\n"
    );
}
