use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "DIARY_DIR";

/// Directory name used under the home directory.
pub const DATA_DIR_NAME: &str = ".mini-diary";

/// Return the user's home directory path.
///
/// Uses HOME on Unix-like systems and USERPROFILE on Windows.
pub fn get_home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Resolve where the diary files live.
///
/// `DIARY_DIR` if set, else `~/.mini-diary`, else the current directory.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    match get_home_dir() {
        Some(home) => home.join(DATA_DIR_NAME),
        None => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_or_remove(key: &str, value: Option<&str>) {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap();
        let previous: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect();

        for (key, value) in vars {
            set_or_remove(key, *value);
        }

        f();

        for (key, value) in &previous {
            set_or_remove(key, value.as_deref());
        }
    }

    #[test]
    fn get_home_dir_prefers_home() {
        with_env(
            &[("HOME", Some("/tmp/home")), ("USERPROFILE", Some("/tmp/profile"))],
            || {
                assert_eq!(get_home_dir(), Some(PathBuf::from("/tmp/home")));
            },
        );
    }

    #[test]
    fn get_home_dir_falls_back_to_userprofile() {
        with_env(&[("HOME", None), ("USERPROFILE", Some("/tmp/profile"))], || {
            assert_eq!(get_home_dir(), Some(PathBuf::from("/tmp/profile")));
        });
    }

    #[test]
    fn default_data_dir_prefers_env_override() {
        with_env(
            &[(DATA_DIR_ENV, Some("/tmp/diary")), ("HOME", Some("/tmp/home"))],
            || {
                assert_eq!(default_data_dir(), PathBuf::from("/tmp/diary"));
            },
        );
    }

    #[test]
    fn default_data_dir_under_home() {
        with_env(&[(DATA_DIR_ENV, None), ("HOME", Some("/tmp/home"))], || {
            assert_eq!(default_data_dir(), PathBuf::from("/tmp/home/.mini-diary"));
        });
    }

    #[test]
    fn default_data_dir_without_home_is_current_dir() {
        with_env(
            &[(DATA_DIR_ENV, None), ("HOME", None), ("USERPROFILE", None)],
            || {
                assert_eq!(default_data_dir(), PathBuf::from("."));
            },
        );
    }
}
