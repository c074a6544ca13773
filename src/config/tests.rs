use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use crate::audio::MAX_VOLUME;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cueplay_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CUEPLAY_CONFIG_PATH", "/tmp/cueplay-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/cueplay-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("cueplay")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cueplay")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_follows_xdg_state_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/xdg-state")
            .join("cueplay")
            .join("cueplay.log")
    );

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".local/state")
            .join("cueplay")
            .join("cueplay.log")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 64
volume_step = 4

[ui]
header_text = "hello"
tick_ms = 50
now_playing_fields = ["artist", "title", "file-name"]
now_playing_separator = " • "
time_fields = ["elapsed", "remaining"]
time_separator = " | "

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
start_dir = "/srv/music"

[logging]
enabled = false
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CUEPLAY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CUEPLAY__AUDIO__VOLUME_STEP");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 64);
    assert_eq!(s.audio.volume_step, 4);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.tick_ms, 50);
    assert_eq!(
        s.ui.now_playing_fields,
        vec![TrackField::Artist, TrackField::Title, TrackField::Filename]
    );
    assert_eq!(s.ui.now_playing_separator, " • ");
    assert_eq!(s.ui.time_fields, vec![TimeField::Elapsed, TimeField::Remaining]);
    assert_eq!(s.ui.time_separator, " | ");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.start_dir, Some(PathBuf::from("/srv/music")));
    assert!(!s.logging.enabled);
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume_step = 8
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CUEPLAY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CUEPLAY__AUDIO__VOLUME_STEP", "3");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume_step, 3);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "CUEPLAY_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, MAX_VOLUME);
    assert_eq!(s.ui.tick_ms, 100);
    assert!(s.logging.enabled);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.initial_volume = MAX_VOLUME + 1;
    assert!(s.validate().is_err());
    s.audio.initial_volume = MAX_VOLUME;

    s.audio.volume_step = 0;
    assert!(s.validate().is_err());
    s.audio.volume_step = 1;

    s.ui.tick_ms = 0;
    assert!(s.validate().is_err());
    s.ui.tick_ms = 100;

    s.library.extensions = vec![" ".into()];
    assert!(s.validate().is_err());
}
