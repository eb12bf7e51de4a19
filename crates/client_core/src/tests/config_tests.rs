use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn defaults_match_the_animation_timings() {
    let settings = Settings::default();
    let timings = settings.timings();
    assert_eq!(timings.screen, Duration::from_millis(600));
    assert_eq!(timings.chrome, Duration::from_millis(400));
    assert_eq!(timings.item, Duration::from_millis(400));
    assert_eq!(timings.menu, Duration::from_millis(600));
    assert_eq!(timings.scroll_threshold_px, 20.0);
    assert_eq!(settings.payment_delay(), Duration::from_secs(2));
    assert_eq!(settings.max_passengers, 16);
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let settings = parse_settings(
        r#"
screen_timeout_ms = 300
theme = "dark"
"#,
    )
    .expect("valid toml");
    assert_eq!(settings.screen_timeout_ms, 300);
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.chrome_timeout_ms, 400);
}

#[test]
fn invalid_toml_is_an_error() {
    assert!(parse_settings("screen_timeout_ms = \"soon\"").is_err());
}

#[test]
fn env_overrides_win_and_bad_values_are_ignored() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP__PAYMENT_DELAY_MS", "0"),
        ("APP__SCROLL_THRESHOLD_PX", "32.5"),
        ("APP__MAX_PASSENGERS", "0"),
        ("APP__THEME", "Dark"),
        ("APP__SCREEN_TIMEOUT_MS", "fast"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(settings.payment_delay_ms, 0);
    assert_eq!(settings.scroll_threshold_px, 32.5);
    assert_eq!(settings.max_passengers, 1);
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.screen_timeout_ms, 600);
}

#[test]
fn load_settings_reads_file_when_present() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("flightpath_settings_{suffix}.toml"));
    fs::write(&path, "item_timeout_ms = 250\n").expect("write settings");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.item_timeout_ms, 250);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = env::temp_dir().join("flightpath_settings_that_does_not_exist.toml");
    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.screen_timeout_ms, Settings::default().screen_timeout_ms);
}
