pub mod catalog;
pub mod gap_fill;
pub mod place_value;
pub mod progress;
pub mod spelling;
pub mod word_sets;

pub use catalog::{LoadState, prepare_words};
pub use gap_fill::{GapFillAction, GapFillExercise, GapStatus};
pub use place_value::{
    DigitMark, NumberSystem, OperationMode, PlaceValueAction, PlaceValueBoard, PlaceValueSettings,
};
pub use progress::ProgressStore;
pub use spelling::{SpellingAction, SpellingGame};
pub use word_sets::{ResolvedSet, SetSelection, SetSummary};
