//! Word catalog loading: explicit lists or the static `words.json` asset.

use std::collections::BTreeSet;

use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestCache, RequestInit, Response};

use crate::config::AppConfig;
use crate::error::{CatalogError, EntryError};
use crate::model::Word;

pub const LOAD_FAILED_MESSAGE: &str =
    "Konnte die Wörter nicht laden. Bitte Seite neu laden oder später erneut versuchen.";

/// Loading and failure are mutually exclusive by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Resolves audio paths of a caller-supplied list; no fetch involved.
pub fn prepare_words(words: Vec<Word>, config: &AppConfig) -> Vec<Word> {
    words
        .into_iter()
        .map(|w| resolve_audio(w, config))
        .collect()
}

fn resolve_audio(mut word: Word, config: &AppConfig) -> Word {
    word.audio_url = config.with_base_path(&word.audio_url);
    word
}

/// Parses a catalog payload. Bad entries are skipped one by one; only a
/// payload that is not a JSON array fails as a whole.
pub fn parse_catalog(json: &str, config: &AppConfig) -> Result<Vec<Word>, CatalogError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(entries) = value else {
        return Err(CatalogError::NotAnArray);
    };
    let mut seen = BTreeSet::new();
    let mut words = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match validate_entry(entry, &seen) {
            Ok(word) => {
                seen.insert(word.id.clone());
                words.push(resolve_audio(word, config));
            }
            Err(e) => log::warn!("Skipping catalog entry #{position}: {e}"),
        }
    }
    Ok(words)
}

pub fn validate_entry(entry: Value, seen: &BTreeSet<String>) -> Result<Word, EntryError> {
    let word: Word = serde_json::from_value(entry).map_err(|e| EntryError::Shape(e.to_string()))?;
    if word.id.trim().is_empty() {
        return Err(EntryError::EmptyId);
    }
    if word.word.is_empty() {
        return Err(EntryError::EmptyWord { id: word.id });
    }
    if let Some(bad) = word.letters.iter().find(|l| l.chars().count() != 1) {
        return Err(EntryError::NotSingleCharacter {
            id: word.id.clone(),
            letter: bad.clone(),
        });
    }
    if seen.contains(&word.id) {
        return Err(EntryError::DuplicateId { id: word.id });
    }
    Ok(word)
}

fn js_err(e: JsValue) -> CatalogError {
    CatalogError::Network(format!("{e:?}"))
}

/// Fetches and parses the catalog asset. The request is aborted after
/// `config.fetch_timeout_ms` and reported as [`CatalogError::Timeout`].
pub async fn fetch_catalog(config: &AppConfig) -> Result<Vec<Word>, CatalogError> {
    let window = web_sys::window().ok_or_else(|| CatalogError::Network("no window".into()))?;
    let controller = AbortController::new().map_err(js_err)?;
    let signal = controller.signal();

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_cache(RequestCache::ForceCache);
    opts.set_signal(Some(&signal));
    let url = config.catalog_url();
    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;

    let abort_cb = Closure::wrap(Box::new(move || controller.abort()) as Box<dyn FnMut()>);
    let timeout_id = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            abort_cb.as_ref().unchecked_ref(),
            config.fetch_timeout_ms as i32,
        )
        .map_err(js_err)?;

    let body = fetch_text(&window, &request).await;
    window.clear_timeout_with_handle(timeout_id);
    drop(abort_cb);

    let body = match body {
        Err(CatalogError::Network(_)) if signal.aborted() => {
            return Err(CatalogError::Timeout(config.fetch_timeout_ms));
        }
        other => other?,
    };
    let words = parse_catalog(&body, config)?;
    log::info!("Loaded {} words from {url}", words.len());
    Ok(words)
}

async fn fetch_text(window: &web_sys::Window, request: &Request) -> Result<String, CatalogError> {
    let response: Response = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        return Err(CatalogError::Status {
            status: response.status(),
            status_text: response.status_text(),
        });
    }
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| CatalogError::Network("response body is not text".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLED: &str = include_str!("../../static/data/words.json");

    #[test]
    fn bundled_catalog_parses_completely() {
        let raw: Vec<Value> = serde_json::from_str(BUNDLED).unwrap();
        let words = parse_catalog(BUNDLED, &AppConfig::default()).unwrap();
        assert_eq!(words.len(), raw.len());
        assert!(words.iter().all(|w| !w.letters.is_empty()));
    }

    #[test]
    fn non_array_payload_is_rejected() {
        let err = parse_catalog(r#"{"words":[]}"#, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnArray));
        let err = parse_catalog("not json", &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn malformed_entries_are_dropped_individually() {
        let json = r#"[
            {"id":"haus","word":"Haus","audioUrl":"/a/haus.mp3","letters":["H","a","u","s"]},
            {"id":"","word":"Maus","audioUrl":"/a/maus.mp3","letters":["M"]},
            {"id":"baum","word":"","audioUrl":"/a/baum.mp3","letters":["B"]},
            {"id":"igel","word":"Igel","audioUrl":"/a/igel.mp3","letters":["Ig","e","l"]},
            {"id":"haus","word":"Haus","audioUrl":"/a/haus2.mp3","letters":["H"]},
            {"id":"ente","word":"Ente"},
            42,
            {"id":"ball","word":"Ball","audioUrl":"/a/ball.mp3","letters":["B","a","l","l"]}
        ]"#;
        let words = parse_catalog(json, &AppConfig::default()).unwrap();
        let ids: Vec<&str> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["haus", "ball"]);
        assert_eq!(words[0].audio_url, "/a/haus.mp3");
    }

    #[test]
    fn entry_errors_name_the_problem() {
        let seen = BTreeSet::from(["haus".to_string()]);
        let dup = serde_json::json!({"id":"haus","word":"Haus","audioUrl":"x","letters":["H"]});
        assert_eq!(
            validate_entry(dup, &seen),
            Err(EntryError::DuplicateId { id: "haus".into() })
        );
        let multi = serde_json::json!({"id":"igel","word":"Igel","audioUrl":"x","letters":["Ig"]});
        assert_eq!(
            validate_entry(multi, &BTreeSet::new()),
            Err(EntryError::NotSingleCharacter { id: "igel".into(), letter: "Ig".into() })
        );
    }

    #[test]
    fn audio_paths_follow_the_base_path() {
        let cfg = AppConfig::with_base_path_prefix("lernen");
        let json = r#"[{"id":"haus","word":"Haus","audioUrl":"/assets/audio/haus.mp3","letters":["H"]}]"#;
        let words = parse_catalog(json, &cfg).unwrap();
        assert_eq!(words[0].audio_url, "/lernen/assets/audio/haus.mp3");

        let prepared = prepare_words(words.clone(), &AppConfig::default());
        assert_eq!(prepared, words);
    }

    #[test]
    fn fetched_words_handed_to_a_set_keep_a_single_prefix() {
        let cfg = AppConfig::with_base_path_prefix("lernen");
        let json = r#"[{"id":"haus","word":"Haus","audioUrl":"/assets/audio/haus.mp3","letters":["H"]}]"#;
        let prepared = prepare_words(parse_catalog(json, &cfg).unwrap(), &cfg);
        assert_eq!(prepared[0].audio_url, "/lernen/assets/audio/haus.mp3");
    }

    #[test]
    fn load_state_never_reports_loading_and_error_together() {
        for state in [LoadState::Loading, LoadState::Ready, LoadState::Failed("x".into())] {
            assert!(!(state.is_loading() && state.error().is_some()));
        }
        assert_eq!(LoadState::Failed("kaputt".into()).error(), Some("kaputt"));
    }
}
