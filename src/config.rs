//! Deployment configuration shared through a Yew context.

pub const DEFAULT_SPELLING_STORAGE_KEY: &str = "nextmindlabs_spelling_progress_v1";
pub const PLACE_VALUE_SETTINGS_KEY: &str = "nextmindlabs_place_value_settings_v1";
pub const CATALOG_PATH: &str = "/data/words.json";
pub const CATALOG_FETCH_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Normalized sub-path prefix, e.g. `/schule`; empty when served from root.
    pub base_path: String,
    pub catalog_path: String,
    pub fetch_timeout_ms: u32,
    pub shuffle_letters: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            catalog_path: CATALOG_PATH.to_string(),
            fetch_timeout_ms: CATALOG_FETCH_TIMEOUT_MS,
            shuffle_letters: true,
        }
    }
}

impl AppConfig {
    /// Reads `TRAINER_BASE_PATH` at compile time.
    pub fn from_build_env() -> Self {
        Self::with_base_path_prefix(option_env!("TRAINER_BASE_PATH").unwrap_or(""))
    }

    pub fn with_base_path_prefix(raw: &str) -> Self {
        Self {
            base_path: normalize_base_path(raw),
            ..Self::default()
        }
    }

    /// Prefixes absolute asset paths with the base path. Relative paths,
    /// full URLs and paths already under the base path are returned unchanged.
    pub fn with_base_path(&self, path: &str) -> String {
        if self.base_path.is_empty() || !path.starts_with('/') || self.is_under_base_path(path) {
            return path.to_string();
        }
        format!("{}{}", self.base_path, path)
    }

    fn is_under_base_path(&self, path: &str) -> bool {
        path.strip_prefix(self.base_path.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    pub fn catalog_url(&self) -> String {
        self.with_base_path(&self.catalog_path)
    }
}

pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

pub fn set_storage_key(index: usize) -> String {
    format!("{DEFAULT_SPELLING_STORAGE_KEY}_set_{index}")
}

pub fn random_set_storage_key() -> String {
    format!("{DEFAULT_SPELLING_STORAGE_KEY}_random")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("schule"), "/schule");
        assert_eq!(normalize_base_path("/schule/"), "/schule");
        assert_eq!(normalize_base_path("apps/lernen/"), "/apps/lernen");
    }

    #[test]
    fn only_absolute_paths_get_the_prefix() {
        let cfg = AppConfig::with_base_path_prefix("/schule/");
        assert_eq!(cfg.with_base_path("/assets/audio/haus.mp3"), "/schule/assets/audio/haus.mp3");
        assert_eq!(cfg.with_base_path("assets/haus.mp3"), "assets/haus.mp3");
        assert_eq!(cfg.with_base_path("https://cdn.example/haus.mp3"), "https://cdn.example/haus.mp3");
        assert_eq!(cfg.catalog_url(), "/schule/data/words.json");

        let root = AppConfig::default();
        assert_eq!(root.with_base_path("/data/words.json"), "/data/words.json");
    }

    #[test]
    fn prefixing_twice_changes_nothing() {
        let cfg = AppConfig::with_base_path_prefix("lernen");
        let once = cfg.with_base_path("/assets/audio/haus.mp3");
        assert_eq!(cfg.with_base_path(&once), "/lernen/assets/audio/haus.mp3");
        assert_eq!(cfg.with_base_path("/lernen"), "/lernen");
        assert_eq!(cfg.with_base_path("/lernende/a.mp3"), "/lernen/lernende/a.mp3");
    }

    #[test]
    fn storage_keys_are_namespaced_per_set() {
        assert_eq!(set_storage_key(3), "nextmindlabs_spelling_progress_v1_set_3");
        assert_eq!(random_set_storage_key(), "nextmindlabs_spelling_progress_v1_random");
    }
}
