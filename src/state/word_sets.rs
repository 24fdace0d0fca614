//! Splits the catalog into practice sets of ten plus a random mix.

use crate::config::{random_set_storage_key, set_storage_key};
use crate::model::Word;
use crate::util::{SplitMix64, shuffle};

pub const WORDS_PER_SET: usize = 10;
pub const RANDOM_WORD_COUNT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetSelection {
    /// 1-based set number.
    Numbered(usize),
    Random,
}

impl SetSelection {
    pub fn from_slug(slug: &str) -> Option<Self> {
        if slug == "zufall" {
            return Some(SetSelection::Random);
        }
        let n: usize = slug.strip_prefix("uebung-")?.parse().ok()?;
        (n >= 1).then_some(SetSelection::Numbered(n))
    }

    pub fn slug(self) -> String {
        match self {
            SetSelection::Numbered(n) => format!("uebung-{n}"),
            SetSelection::Random => "zufall".to_string(),
        }
    }

    pub fn storage_key(self) -> String {
        match self {
            SetSelection::Numbered(n) => set_storage_key(n),
            SetSelection::Random => random_set_storage_key(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetSummary {
    pub selection: SetSelection,
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSet {
    pub selection: SetSelection,
    pub title: String,
    pub description: String,
    pub storage_key: String,
    pub words: Vec<Word>,
}

pub fn set_count(total_words: usize) -> usize {
    total_words.div_ceil(WORDS_PER_SET)
}

fn set_bounds(n: usize, total: usize) -> (usize, usize) {
    let start = (n - 1) * WORDS_PER_SET;
    (start, (start + WORDS_PER_SET).min(total))
}

fn examples(words: &[Word]) -> Vec<String> {
    words.iter().take(3).map(|w| w.word.clone()).collect()
}

/// Overview cards, one per numbered set.
pub fn word_sets(words: &[Word]) -> Vec<SetSummary> {
    (1..=set_count(words.len()))
        .map(|n| {
            let (start, end) = set_bounds(n, words.len());
            SetSummary {
                selection: SetSelection::Numbered(n),
                title: format!("Übung {n}"),
                description: format!("Wörter {} – {end}", start + 1),
                examples: examples(&words[start..end]),
            }
        })
        .collect()
}

/// Words for one set; `None` for a set number past the end of the catalog.
pub fn resolve_set(
    selection: SetSelection,
    words: &[Word],
    rng: &mut SplitMix64,
) -> Option<ResolvedSet> {
    match selection {
        SetSelection::Random => Some(ResolvedSet {
            selection,
            title: format!("Zufallsmix: {RANDOM_WORD_COUNT} Wörter querbeet"),
            description: "Ein gemischter Durchlauf quer durch alle Fehlerwörter – perfekt zum Festigen."
                .to_string(),
            storage_key: selection.storage_key(),
            words: shuffle(words, rng).into_iter().take(RANDOM_WORD_COUNT).collect(),
        }),
        SetSelection::Numbered(n) => {
            if n == 0 || n > set_count(words.len()) {
                return None;
            }
            let (start, end) = set_bounds(n, words.len());
            let subset = words[start..end].to_vec();
            Some(ResolvedSet {
                selection,
                title: format!("Übung {n}: Wörter {}–{end}", start + 1),
                description: format!(
                    "Trainiere diese Wörter in Folge. Beispiele: {} …",
                    examples(&subset).join(", ")
                ),
                storage_key: selection.storage_key(),
                words: subset,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<Word> {
        (0..n)
            .map(|i| Word {
                id: format!("w{i}"),
                word: format!("Wort{i}"),
                audio_url: String::new(),
                letters: vec![],
                hint: None,
                hints: None,
                sentence: None,
            })
            .collect()
    }

    #[test]
    fn slugs_round_trip() {
        assert_eq!(SetSelection::from_slug("uebung-3"), Some(SetSelection::Numbered(3)));
        assert_eq!(SetSelection::from_slug("zufall"), Some(SetSelection::Random));
        assert_eq!(SetSelection::from_slug("uebung-0"), None);
        assert_eq!(SetSelection::from_slug("uebung-x"), None);
        assert_eq!(SetSelection::from_slug("lektion-1"), None);
        assert_eq!(SetSelection::Numbered(4).slug(), "uebung-4");
    }

    #[test]
    fn sets_chunk_by_ten() {
        let all = words(23);
        let sets = word_sets(&all);
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[2].description, "Wörter 21 – 23");
        assert_eq!(sets[0].examples, ["Wort0", "Wort1", "Wort2"]);
    }

    #[test]
    fn numbered_set_slices_the_catalog() {
        let all = words(23);
        let mut rng = SplitMix64::new(1);
        let set = resolve_set(SetSelection::Numbered(3), &all, &mut rng).unwrap();
        assert_eq!(set.words.len(), 3);
        assert_eq!(set.words[0].id, "w20");
        assert_eq!(set.title, "Übung 3: Wörter 21–23");
        assert_eq!(set.storage_key, "nextmindlabs_spelling_progress_v1_set_3");
        assert!(resolve_set(SetSelection::Numbered(4), &all, &mut rng).is_none());
    }

    #[test]
    fn random_mix_takes_twenty_distinct_words() {
        let all = words(35);
        let mut rng = SplitMix64::new(9);
        let set = resolve_set(SetSelection::Random, &all, &mut rng).unwrap();
        assert_eq!(set.words.len(), RANDOM_WORD_COUNT);
        let mut ids: Vec<_> = set.words.iter().map(|w| w.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), RANDOM_WORD_COUNT);
        assert_eq!(set.storage_key, "nextmindlabs_spelling_progress_v1_random");

        let small = resolve_set(SetSelection::Random, &words(5), &mut rng).unwrap();
        assert_eq!(small.words.len(), 5);
    }
}
