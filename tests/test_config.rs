use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use coin_catcher::config::*;
use coin_catcher::error::{check_surface, GameError};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ── GameConfig ────────────────────────────────────────────────────────────────

#[test]
fn defaults_match_the_classic_playfield() {
    let c = GameConfig::default();
    assert_eq!(c.playfield.width, 800.0);
    assert_eq!(c.playfield.height, 600.0);
    assert_eq!(c.frame_interval, Duration::from_secs(1) / 60);
    assert_eq!(c.log_file, None);
}

#[test]
fn empty_environment_gives_defaults() {
    assert_eq!(GameConfig::from_lookup(lookup(&[])), GameConfig::default());
}

#[test]
fn overrides_are_applied() {
    let c = GameConfig::from_lookup(lookup(&[
        (ENV_WIDTH, "1024"),
        (ENV_HEIGHT, " 768 "),
        (ENV_FPS, "30"),
        (ENV_LOG, "/tmp/coin_catcher.log"),
    ]));
    assert_eq!(c.playfield.width, 1024.0);
    assert_eq!(c.playfield.height, 768.0);
    assert_eq!(c.frame_interval, Duration::from_secs(1) / 30);
    assert_eq!(c.log_file, Some(PathBuf::from("/tmp/coin_catcher.log")));
}

#[test]
fn invalid_values_fall_back() {
    let c = GameConfig::from_lookup(lookup(&[
        (ENV_WIDTH, "wide"),
        (ENV_HEIGHT, "-5"),
        (ENV_FPS, "0"),
        (ENV_LOG, "   "),
    ]));
    assert_eq!(c, GameConfig::default());

    let c = GameConfig::from_lookup(lookup(&[(ENV_FPS, "1000"), (ENV_WIDTH, "0")]));
    assert_eq!(c, GameConfig::default());
}

// ── check_surface ─────────────────────────────────────────────────────────────

#[test]
fn surface_must_be_a_terminal() {
    assert!(matches!(check_surface(false, 80, 24), Err(GameError::NotATerminal)));
}

#[test]
fn surface_must_be_big_enough() {
    assert!(matches!(
        check_surface(true, 10, 24),
        Err(GameError::SurfaceTooSmall { cols: 10, rows: 24 })
    ));
    assert!(matches!(
        check_surface(true, 80, 5),
        Err(GameError::SurfaceTooSmall { .. })
    ));
}

#[test]
fn usable_surface_passes() {
    assert!(check_surface(true, 80, 24).is_ok());
    assert!(check_surface(true, 20, 10).is_ok());
}

#[test]
fn surface_errors_explain_themselves() {
    let e = check_surface(true, 10, 5).unwrap_err();
    assert_eq!(e.to_string(), "terminal is 10x5, need at least 20x10");
}
