//! Spelling game: hear a word, rebuild it from letter tiles.
//!
//! The engine is a pure state machine. Catalog fetching, audio playback and
//! persistence happen in the view, which feeds results back in as actions.

use std::rc::Rc;

use yew::Reducible;

use super::catalog::LoadState;
use crate::model::{Feedback, GameStatus, MistakeMap, StoredProgress, Word};
use crate::util::{SplitMix64, normalize_index, shuffle};

#[derive(Clone, Debug, PartialEq)]
pub struct SpellingGame {
    words: Rc<Vec<Word>>,
    current_index: usize,
    letter_pool: Vec<String>,
    /// Never longer than the current target word.
    user_input: Vec<String>,
    status: GameStatus,
    feedback: Feedback,
    is_locked: bool,
    show_next_prompt: bool,
    audio_available: bool,
    should_shake: bool,
    mistakes: MistakeMap,
    load_state: LoadState,
    progress_loaded: bool,
    shuffle: bool,
    rng: SplitMix64,
}

impl SpellingGame {
    /// Empty session waiting for a catalog.
    pub fn new(shuffle: bool, rng: SplitMix64) -> Self {
        Self {
            words: Rc::new(Vec::new()),
            current_index: 0,
            letter_pool: Vec::new(),
            user_input: Vec::new(),
            status: GameStatus::Idle,
            feedback: Feedback::None,
            is_locked: false,
            show_next_prompt: false,
            audio_available: true,
            should_shake: false,
            mistakes: MistakeMap::new(),
            load_state: LoadState::Loading,
            progress_loaded: false,
            shuffle,
            rng,
        }
    }

    /// Session over a caller-supplied list; an empty list still needs a fetch.
    pub fn with_words(words: Vec<Word>, shuffle: bool, rng: SplitMix64) -> Self {
        let mut game = Self::new(shuffle, rng);
        if !words.is_empty() {
            game.catalog_loaded(words);
        }
        game
    }

    // ---------------- Accessors -----------------

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn current_index(&self) -> usize {
        normalize_index(self.current_index as i64, self.words.len())
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.current_index())
    }

    pub fn letter_pool(&self) -> &[String] {
        &self.letter_pool
    }

    pub fn user_input(&self) -> &[String] {
        &self.user_input
    }

    pub fn attempt(&self) -> String {
        self.user_input.concat()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn show_next_prompt(&self) -> bool {
        self.show_next_prompt
    }

    pub fn audio_available(&self) -> bool {
        self.audio_available
    }

    pub fn should_shake(&self) -> bool {
        self.should_shake
    }

    pub fn mistakes(&self) -> &MistakeMap {
        &self.mistakes
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn progress_loaded(&self) -> bool {
        self.progress_loaded
    }

    /// Snapshot for the progress store.
    pub fn progress(&self) -> StoredProgress {
        StoredProgress {
            index: Some(self.current_index() as i64),
            mistakes: Some(self.mistakes.clone()),
        }
    }

    // ---------------- Catalog & progress lifecycle -----------------

    pub fn catalog_loaded(&mut self, words: Vec<Word>) {
        self.words = Rc::new(words);
        self.load_state = LoadState::Ready;
        self.current_index = self.current_index();
        self.reset_for_word();
    }

    /// Keeps whatever words were loaded before.
    pub fn catalog_failed(&mut self, message: String) {
        self.load_state = LoadState::Failed(message);
    }

    /// Applies stored progress once, as soon as words are available.
    pub fn hydrate(&mut self, stored: Option<StoredProgress>) {
        if self.words.is_empty() || self.progress_loaded {
            return;
        }
        if let Some(stored) = stored {
            self.current_index = normalize_index(stored.index.unwrap_or(0), self.words.len());
            self.mistakes = stored.mistakes.unwrap_or_default();
            log::debug!(
                "Restored progress: word {} of {}, {} words with mistakes",
                self.current_index + 1,
                self.words.len(),
                self.mistakes.len()
            );
        }
        self.progress_loaded = true;
        self.reset_for_word();
    }

    /// Back to the first word with a clean mistake tally.
    pub fn restart(&mut self) {
        if self.words.is_empty() {
            return;
        }
        self.current_index = 0;
        self.mistakes.clear();
        self.reset_for_word();
    }

    // ---------------- Player actions -----------------

    pub fn select_letter(&mut self, letter: &str) {
        let Some(target_len) = self.current_word().map(Word::target_len) else {
            return;
        };
        if self.is_locked {
            return;
        }
        if self.user_input.len() >= target_len {
            self.fail(Feedback::InputFull);
            return;
        }
        self.user_input.push(letter.to_string());
        if self.feedback.is_error() {
            self.feedback = Feedback::None;
        }
        self.status = GameStatus::Idle;
    }

    pub fn remove_letter(&mut self) {
        if self.is_locked || self.user_input.pop().is_none() {
            return;
        }
        if self.status != GameStatus::Success {
            self.status = GameStatus::Idle;
        }
    }

    pub fn clear_input(&mut self) {
        if self.is_locked || self.user_input.is_empty() {
            return;
        }
        self.user_input.clear();
        self.status = GameStatus::Idle;
        self.feedback = Feedback::None;
    }

    pub fn check_answer(&mut self) {
        if self.is_locked {
            return;
        }
        let Some(word) = self.current_word() else {
            return;
        };
        let target = word.word.clone();
        let id = word.id.clone();
        let hint = word.hint().map(str::to_string);

        let attempt = self.attempt();
        if attempt.is_empty() {
            self.fail(Feedback::EmptyAttempt);
            return;
        }
        let have = attempt.chars().count();
        let want = target.chars().count();
        if have != want {
            let feedback = if have < want {
                Feedback::MissingLetters(want - have)
            } else {
                Feedback::TooManyLetters
            };
            self.fail(feedback);
            return;
        }
        if attempt == target {
            self.status = GameStatus::Success;
            self.feedback = Feedback::Solved;
            self.is_locked = true;
            self.show_next_prompt = true;
            return;
        }
        let count = self.mistakes.entry(id).or_insert(0);
        *count = count.saturating_add(1);
        self.fail(hint.map_or(Feedback::TryAgain, Feedback::Hint));
    }

    pub fn go_to_next_word(&mut self) {
        if self.words.is_empty() {
            return;
        }
        self.show_next_prompt = false;
        self.current_index = normalize_index(self.current_index() as i64 + 1, self.words.len());
        self.reset_for_word();
    }

    /// Re-deals the tiles of the current word; nothing else changes.
    pub fn refresh_letters(&mut self) {
        if self.current_word().is_none() {
            return;
        }
        self.letter_pool = self.deal_letters();
    }

    pub fn acknowledge_shake(&mut self) {
        self.should_shake = false;
    }

    pub fn mark_audio_unavailable(&mut self) {
        self.audio_available = false;
        self.feedback = Feedback::AudioUnavailable;
    }

    pub fn reset_audio_availability(&mut self) {
        self.audio_available = true;
    }

    /// Is `value` a single character offered for the current word (any case)?
    pub fn is_valid_letter(&self, value: &str) -> bool {
        let mut chars = value.chars();
        if chars.next().is_none() || chars.next().is_some() {
            return false;
        }
        let wanted = value.to_lowercase();
        self.current_word()
            .is_some_and(|w| w.letters.iter().any(|l| l.to_lowercase() == wanted))
    }

    /// Maps a typed key onto the tile with the same letter, keeping the tile's case.
    pub fn key_to_letter(&self, key: &str) -> Option<String> {
        if !self.is_valid_letter(key) {
            return None;
        }
        let wanted = key.to_lowercase();
        let tile = self
            .letter_pool
            .iter()
            .find(|l| l.to_lowercase() == wanted)
            .cloned();
        Some(tile.unwrap_or_else(|| key.to_string()))
    }

    /// Whether the view should swallow this key (and dispatch it).
    pub fn wants_key(&self, key: &str) -> bool {
        self.current_word().is_some()
            && (matches!(key, "Backspace" | "Enter" | "Escape") || self.is_valid_letter(key))
    }

    pub fn handle_key(&mut self, key: &str) {
        if self.current_word().is_none() {
            return;
        }
        match key {
            "Backspace" => self.remove_letter(),
            "Enter" => self.check_answer(),
            "Escape" => self.clear_input(),
            _ => {
                if let Some(letter) = self.key_to_letter(key) {
                    self.select_letter(&letter);
                }
            }
        }
    }

    // ---------------- Internals -----------------

    fn fail(&mut self, feedback: Feedback) {
        self.status = GameStatus::Error;
        self.feedback = feedback;
        self.should_shake = true;
    }

    fn deal_letters(&mut self) -> Vec<String> {
        let Some(word) = self.words.get(self.current_index()) else {
            return Vec::new();
        };
        if self.shuffle {
            shuffle(&word.letters, &mut self.rng)
        } else {
            word.letters.clone()
        }
    }

    fn reset_for_word(&mut self) {
        self.letter_pool = self.deal_letters();
        self.user_input.clear();
        self.status = GameStatus::Idle;
        self.feedback = Feedback::None;
        self.is_locked = false;
        self.show_next_prompt = false;
        self.audio_available = true;
        self.should_shake = false;
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum SpellingAction {
    SelectLetter(String),
    RemoveLetter,
    ClearInput,
    CheckAnswer,
    NextWord,
    RefreshLetters,
    AcknowledgeShake,
    AudioUnavailable,
    AudioAvailable,
    Key(String),
    CatalogLoaded(Vec<Word>),
    CatalogFailed(String),
    Hydrate(Option<StoredProgress>),
    Restart,
}

impl Reducible for SpellingGame {
    type Action = SpellingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SpellingAction::*;
        let mut new = (*self).clone();
        match action {
            SelectLetter(letter) => new.select_letter(&letter),
            RemoveLetter => new.remove_letter(),
            ClearInput => new.clear_input(),
            CheckAnswer => new.check_answer(),
            NextWord => new.go_to_next_word(),
            RefreshLetters => new.refresh_letters(),
            AcknowledgeShake => new.acknowledge_shake(),
            AudioUnavailable => new.mark_audio_unavailable(),
            AudioAvailable => new.reset_audio_availability(),
            Key(key) => new.handle_key(&key),
            CatalogLoaded(words) => new.catalog_loaded(words),
            CatalogFailed(message) => new.catalog_failed(message),
            Hydrate(stored) => new.hydrate(stored),
            Restart => new.restart(),
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}
