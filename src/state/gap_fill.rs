//! Gap-fill ("Lückentext") trainer: pick the word that completes a sentence.

use std::rc::Rc;

use yew::Reducible;

use crate::model::Word;
use crate::util::{SplitMix64, shuffle};

/// Wrong choices offered next to the right one.
pub const DISTRACTOR_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GapStatus {
    #[default]
    Idle,
    Selected,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GapFillExercise {
    words: Rc<Vec<Word>>,
    pool: Rc<Vec<Word>>,
    current_index: usize,
    options: Vec<Word>,
    selected: Option<String>,
    status: GapStatus,
    finished: bool,
    rng: SplitMix64,
}

impl GapFillExercise {
    /// `words` are practised in order; distractors come from `pool`. Words
    /// whose sentence lacks exactly one gap are left out of both.
    pub fn new(words: Vec<Word>, pool: Vec<Word>, rng: SplitMix64) -> Self {
        let usable = |list: Vec<Word>| -> Vec<Word> {
            list.into_iter().filter(|w| w.gap_parts().is_some()).collect()
        };
        let mut exercise = Self {
            words: Rc::new(usable(words)),
            pool: Rc::new(usable(pool)),
            current_index: 0,
            options: Vec::new(),
            selected: None,
            status: GapStatus::Idle,
            finished: false,
            rng,
        };
        exercise.deal_options();
        exercise
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.current_index)
    }

    pub fn options(&self) -> &[Word] {
        &self.options
    }

    pub fn selected(&self) -> Option<&Word> {
        let id = self.selected.as_deref()?;
        self.options.iter().find(|w| w.id == id)
    }

    pub fn status(&self) -> GapStatus {
        self.status
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.words.len()
    }

    pub fn can_check(&self) -> bool {
        self.selected.is_some() && self.status != GapStatus::Success
    }

    /// Sentence text around the gap of the current word.
    pub fn sentence_parts(&self) -> Option<(&str, &str)> {
        self.current_word().and_then(Word::gap_parts)
    }

    pub fn select_option(&mut self, id: &str) {
        if self.finished || self.status == GapStatus::Success {
            return;
        }
        if !self.options.iter().any(|w| w.id == id) {
            return;
        }
        self.selected = Some(id.to_string());
        self.status = GapStatus::Selected;
    }

    pub fn check(&mut self) {
        if !self.can_check() {
            return;
        }
        let correct = match (self.selected.as_deref(), self.current_word()) {
            (Some(sel), Some(word)) => sel == word.id,
            _ => return,
        };
        self.status = if correct { GapStatus::Success } else { GapStatus::Error };
    }

    /// Ends the red flash after a wrong pick.
    pub fn settle_error(&mut self) {
        if self.status == GapStatus::Error {
            self.status = GapStatus::Selected;
        }
    }

    /// Advances after a solved sentence; the last one finishes the exercise.
    pub fn next(&mut self) {
        if self.status != GapStatus::Success || self.finished {
            return;
        }
        if self.is_last() {
            self.finished = true;
            return;
        }
        self.current_index += 1;
        self.selected = None;
        self.status = GapStatus::Idle;
        self.deal_options();
    }

    fn deal_options(&mut self) {
        let Some(target) = self.words.get(self.current_index).cloned() else {
            self.options.clear();
            return;
        };
        let others: Vec<Word> = self
            .pool
            .iter()
            .filter(|w| w.id != target.id)
            .cloned()
            .collect();
        let mut options: Vec<Word> = shuffle(&others, &mut self.rng)
            .into_iter()
            .take(DISTRACTOR_COUNT)
            .collect();
        options.push(target);
        self.options = shuffle(&options, &mut self.rng);
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GapFillAction {
    Select(String),
    Check,
    SettleError,
    Next,
}

impl Reducible for GapFillExercise {
    type Action = GapFillAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            GapFillAction::Select(id) => new.select_option(&id),
            GapFillAction::Check => new.check(),
            GapFillAction::SettleError => new.settle_error(),
            GapFillAction::Next => new.next(),
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(id: &str, sentence: Option<&str>) -> Word {
        Word {
            id: id.into(),
            word: id.into(),
            audio_url: String::new(),
            letters: vec![],
            hint: None,
            hints: None,
            sentence: sentence.map(str::to_string),
        }
    }

    fn pool() -> Vec<Word> {
        ["haus", "baum", "ball", "igel", "ente", "hund", "maus"]
            .iter()
            .map(|id| word(id, Some("Das ___ ist hier.")))
            .collect()
    }

    fn exercise(words: Vec<Word>) -> GapFillExercise {
        GapFillExercise::new(words, pool(), SplitMix64::new(8))
    }

    #[test]
    fn options_hold_the_target_once_plus_distractors() {
        let ex = exercise(pool()[..3].to_vec());
        let options = ex.options();
        assert_eq!(options.len(), DISTRACTOR_COUNT + 1);
        assert_eq!(options.iter().filter(|w| w.id == "haus").count(), 1);
        let mut ids: Vec<&str> = options.iter().map(|w| w.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), options.len());
    }

    #[test]
    fn small_pool_gives_fewer_options() {
        let few = pool()[..2].to_vec();
        let ex = GapFillExercise::new(few.clone(), few, SplitMix64::new(1));
        assert_eq!(ex.options().len(), 2);
    }

    #[test]
    fn words_without_a_single_gap_are_skipped() {
        let words = vec![
            word("a", None),
            word("b", Some("kein Platzhalter")),
            word("c", Some("___ und ___")),
            word("haus", Some("Ein ___.")),
        ];
        let ex = exercise(words);
        assert_eq!(ex.total_words(), 1);
        assert_eq!(ex.sentence_parts(), Some(("Ein ", ".")));
    }

    #[test]
    fn wrong_pick_flashes_then_settles() {
        let mut ex = exercise(pool()[..2].to_vec());
        ex.check();
        assert_eq!(ex.status(), GapStatus::Idle);

        let wrong = ex.options().iter().find(|w| w.id != "haus").unwrap().id.clone();
        ex.select_option(&wrong);
        assert_eq!(ex.status(), GapStatus::Selected);
        ex.check();
        assert_eq!(ex.status(), GapStatus::Error);
        ex.settle_error();
        assert_eq!(ex.status(), GapStatus::Selected);

        ex.select_option("not-offered");
        assert_eq!(ex.selected().map(|w| w.id.as_str()), Some(wrong.as_str()));
    }

    #[test]
    fn right_pick_locks_and_next_advances_to_the_end() {
        let mut ex = exercise(pool()[..2].to_vec());
        ex.next();
        assert_eq!(ex.current_index(), 0);

        ex.select_option("haus");
        ex.check();
        assert_eq!(ex.status(), GapStatus::Success);
        ex.select_option("baum");
        assert_eq!(ex.selected().unwrap().id, "haus");
        ex.settle_error();
        assert_eq!(ex.status(), GapStatus::Success);

        ex.next();
        assert_eq!(ex.current_index(), 1);
        assert_eq!(ex.status(), GapStatus::Idle);
        assert!(ex.selected().is_none());
        assert!(ex.options().iter().any(|w| w.id == "baum"));
        assert!(ex.is_last());

        ex.select_option("baum");
        ex.check();
        ex.next();
        assert!(ex.finished());
    }

    #[test]
    fn reducer_round() {
        let state = Rc::new(exercise(pool()[..1].to_vec()));
        let state = state.reduce(GapFillAction::Select("haus".into()));
        let state = state.reduce(GapFillAction::Check);
        let state = state.reduce(GapFillAction::Next);
        assert!(state.finished());
    }
}
