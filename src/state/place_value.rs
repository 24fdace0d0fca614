//! Place-value trainer: a fixed row of digits under base 10, 2 or 16.
//!
//! Tapping a digit adds (or, in subtract mode, removes) one unit at that
//! position. With auto-carry the overflow ripples left; without it the
//! position is only flagged so the child can carry by hand.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use yew::Reducible;

/// Number of positions on the board.
pub const WIDTH: usize = 7;

const DECIMAL_LABELS: [&str; WIDTH] = [
    "Millionen",
    "H_Tausender",
    "Z_Tausender",
    "Tausender",
    "Hunderter",
    "Zehner",
    "Einer",
];
const BINARY_LABELS: [&str; WIDTH] = ["2⁶", "2⁵", "2⁴", "2³", "2²", "2¹", "2⁰"];
const HEX_LABELS: [&str; WIDTH] = ["16⁶", "16⁵", "16⁴", "16³", "16²", "16¹", "16⁰"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberSystem {
    #[default]
    Decimal,
    Binary,
    Hex,
}

impl NumberSystem {
    pub const ALL: [NumberSystem; 3] = [NumberSystem::Decimal, NumberSystem::Binary, NumberSystem::Hex];

    pub fn base(self) -> u8 {
        match self {
            NumberSystem::Decimal => 10,
            NumberSystem::Binary => 2,
            NumberSystem::Hex => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NumberSystem::Decimal => "Dezimalsystem",
            NumberSystem::Binary => "Binärsystem",
            NumberSystem::Hex => "Hexadezimalsystem",
        }
    }

    pub fn labels(self) -> &'static [&'static str; WIDTH] {
        match self {
            NumberSystem::Decimal => &DECIMAL_LABELS,
            NumberSystem::Binary => &BINARY_LABELS,
            NumberSystem::Hex => &HEX_LABELS,
        }
    }

    pub fn format_digit(self, digit: u8) -> String {
        self.format_value(digit as u64)
    }

    pub fn format_value(self, value: u64) -> String {
        match self {
            NumberSystem::Decimal => value.to_string(),
            NumberSystem::Binary => format!("{value:b}"),
            NumberSystem::Hex => format!("{value:X}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    #[default]
    Add,
    Subtract,
}

/// Transient per-position highlight, cleared by the next operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitMark {
    /// Wrapped to zero and passed one unit to the left.
    Carry,
    /// Wrapped to zero, carry left for the player.
    Overflow,
    /// Wrapped to `base - 1` after taking one unit from the left.
    Borrow,
    /// Wrapped to `base - 1`, borrow left for the player.
    Underflow,
    /// Subtraction refused: the number would go below zero.
    Rejected,
}

/// Everything about the board the player chooses, as opposed to the digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaceValueSettings {
    pub system: NumberSystem,
    pub mode: OperationMode,
    pub auto_carry: bool,
    pub hide_leading_zeros: bool,
    pub show_visual_units: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaceValueBoard {
    digits: [u8; WIDTH],
    marks: [Option<DigitMark>; WIDTH],
    settings: PlaceValueSettings,
}

/// Current value as shown under the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readout {
    pub system: NumberSystem,
    pub native: String,
    /// Decimal equivalent for binary and hex boards.
    pub decimal: Option<String>,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.decimal, self.system) {
            (Some(dec), NumberSystem::Binary) => write!(f, "{} (binär) – {dec} (dezimal)", self.native),
            (Some(dec), _) => write!(f, "{} (hex) – {dec} (dezimal)", self.native),
            (None, _) => f.write_str(&self.native),
        }
    }
}

impl PlaceValueBoard {
    pub fn new(settings: PlaceValueSettings) -> Self {
        Self {
            digits: [0; WIDTH],
            marks: [None; WIDTH],
            settings,
        }
    }

    /// Board with preset digits; `None` if any digit does not fit the base.
    #[cfg(test)]
    pub fn with_digits(settings: PlaceValueSettings, digits: [u8; WIDTH]) -> Option<Self> {
        let base = settings.system.base();
        if digits.iter().any(|&d| d >= base) {
            return None;
        }
        Some(Self {
            digits,
            ..Self::new(settings)
        })
    }

    pub fn digits(&self) -> &[u8; WIDTH] {
        &self.digits
    }

    pub fn marks(&self) -> &[Option<DigitMark>; WIDTH] {
        &self.marks
    }

    pub fn settings(&self) -> PlaceValueSettings {
        self.settings
    }

    pub fn system(&self) -> NumberSystem {
        self.settings.system
    }

    pub fn base(&self) -> u8 {
        self.settings.system.base()
    }

    pub fn value(&self) -> u64 {
        self.value_through(WIDTH - 1)
    }

    /// Value of positions `0..=pos` read as a number on their own.
    fn value_through(&self, pos: usize) -> u64 {
        let base = self.base() as u64;
        self.digits[..=pos]
            .iter()
            .fold(0, |acc, &d| acc * base + d as u64)
    }

    /// Weight of one unit at `pos`.
    pub fn place_weight(&self, pos: usize) -> u64 {
        (self.base() as u64).pow((WIDTH - 1 - pos) as u32)
    }

    pub fn readout(&self) -> Readout {
        let system = self.system();
        let value = self.value();
        Readout {
            system,
            native: system.format_value(value),
            decimal: (system != NumberSystem::Decimal).then(|| value.to_string()),
        }
    }

    /// Positions to hide when leading zeros are suppressed. The last
    /// position always stays visible.
    pub fn hidden_mask(&self) -> [bool; WIDTH] {
        let mut mask = [false; WIDTH];
        if !self.settings.hide_leading_zeros {
            return mask;
        }
        for (i, &d) in self.digits.iter().enumerate().take(WIDTH - 1) {
            if d != 0 {
                break;
            }
            mask[i] = true;
        }
        mask
    }

    /// Unit count to draw at `pos` when visual units are enabled.
    pub fn units(&self, pos: usize) -> Option<u8> {
        if !self.settings.show_visual_units {
            return None;
        }
        self.digits.get(pos).copied()
    }

    // ---------------- Operations -----------------

    pub fn change_system(&mut self, system: NumberSystem) {
        self.settings.system = system;
        let max = system.base() - 1;
        for d in &mut self.digits {
            if *d > max {
                *d = max;
            }
        }
        self.clear_marks();
    }

    pub fn set_mode(&mut self, mode: OperationMode) {
        self.settings.mode = mode;
        self.clear_marks();
    }

    pub fn apply_settings(&mut self, settings: PlaceValueSettings) {
        self.settings = settings;
        self.change_system(settings.system);
    }

    /// Adds one unit at `pos`. Returns `false` for an out-of-range position.
    pub fn increment_digit(&mut self, pos: usize) -> bool {
        if pos >= WIDTH {
            return false;
        }
        self.clear_marks();
        let base = self.base();
        let mut p = pos;
        loop {
            self.digits[p] += 1;
            if self.digits[p] < base {
                break;
            }
            self.digits[p] = 0;
            if !self.settings.auto_carry {
                self.marks[p] = Some(DigitMark::Overflow);
                break;
            }
            self.marks[p] = Some(DigitMark::Carry);
            // Fixed width: a carry out of the leftmost position is lost.
            if p == 0 {
                break;
            }
            p -= 1;
        }
        true
    }

    /// Removes one unit at `pos`. Refused, with the position flagged, when
    /// everything up to and including `pos` is already zero.
    pub fn decrement_digit(&mut self, pos: usize) -> bool {
        if pos >= WIDTH {
            return false;
        }
        self.clear_marks();
        if self.value_through(pos) == 0 {
            self.marks[pos] = Some(DigitMark::Rejected);
            return false;
        }
        let base = self.base();
        let mut p = pos;
        loop {
            if self.digits[p] > 0 {
                self.digits[p] -= 1;
                break;
            }
            self.digits[p] = base - 1;
            if !self.settings.auto_carry {
                self.marks[p] = Some(DigitMark::Underflow);
                break;
            }
            self.marks[p] = Some(DigitMark::Borrow);
            if p == 0 {
                break;
            }
            p -= 1;
        }
        true
    }

    /// A tap on a digit card: add or subtract depending on the mode.
    pub fn press_digit(&mut self, pos: usize) -> bool {
        match self.settings.mode {
            OperationMode::Add => self.increment_digit(pos),
            OperationMode::Subtract => self.decrement_digit(pos),
        }
    }

    pub fn reset(&mut self) {
        self.digits = [0; WIDTH];
        self.clear_marks();
    }

    pub fn clear_marks(&mut self) {
        self.marks = [None; WIDTH];
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum PlaceValueAction {
    Press(usize),
    Increment(usize),
    Decrement(usize),
    ChangeSystem(NumberSystem),
    SetMode(OperationMode),
    ToggleAutoCarry,
    ToggleHideLeadingZeros,
    ToggleVisualUnits,
    ApplySettings(PlaceValueSettings),
    Reset,
    ClearMarks,
}

impl Reducible for PlaceValueBoard {
    type Action = PlaceValueAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use PlaceValueAction::*;
        let mut new = (*self).clone();
        match action {
            Press(pos) => {
                new.press_digit(pos);
            }
            Increment(pos) => {
                new.increment_digit(pos);
            }
            Decrement(pos) => {
                new.decrement_digit(pos);
            }
            ChangeSystem(system) => new.change_system(system),
            SetMode(mode) => new.set_mode(mode),
            ToggleAutoCarry => new.settings.auto_carry = !new.settings.auto_carry,
            ToggleHideLeadingZeros => {
                new.settings.hide_leading_zeros = !new.settings.hide_leading_zeros
            }
            ToggleVisualUnits => new.settings.show_visual_units = !new.settings.show_visual_units,
            ApplySettings(settings) => new.apply_settings(settings),
            Reset => new.reset(),
            ClearMarks => new.clear_marks(),
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
    use crate::util::SplitMix64;

    fn settings(system: NumberSystem, auto_carry: bool) -> PlaceValueSettings {
        PlaceValueSettings {
            system,
            auto_carry,
            ..Default::default()
        }
    }

    fn board(system: NumberSystem, auto_carry: bool, digits: [u8; WIDTH]) -> PlaceValueBoard {
        PlaceValueBoard::with_digits(settings(system, auto_carry), digits).unwrap()
    }

    #[test]
    fn nine_plus_one_carries_into_the_tens() {
        let mut b = board(NumberSystem::Decimal, true, [0, 0, 0, 0, 0, 0, 9]);
        assert!(b.increment_digit(6));
        assert_eq!(b.digits(), &[0, 0, 0, 0, 0, 1, 0]);
        assert_eq!(b.marks()[6], Some(DigitMark::Carry));
        assert_eq!(b.value(), 10);
    }

    #[test]
    fn carry_ripples_through_several_positions() {
        let mut b = board(NumberSystem::Decimal, true, [0, 0, 0, 0, 9, 9, 9]);
        b.increment_digit(6);
        assert_eq!(b.digits(), &[0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn without_auto_carry_the_overflow_is_only_flagged() {
        let mut b = board(NumberSystem::Decimal, false, [0, 0, 0, 0, 0, 3, 9]);
        b.increment_digit(6);
        assert_eq!(b.digits(), &[0, 0, 0, 0, 0, 3, 0]);
        assert_eq!(b.marks()[6], Some(DigitMark::Overflow));
        assert_eq!(b.marks()[5], None);
    }

    #[test]
    fn carry_out_of_the_leftmost_position_is_dropped() {
        let mut b = board(NumberSystem::Binary, true, [1; WIDTH]);
        b.increment_digit(6);
        assert_eq!(b.digits(), &[0; WIDTH]);
        assert_eq!(b.value(), 0);
    }

    #[test]
    fn subtracting_from_zero_is_rejected() {
        let mut b = PlaceValueBoard::new(PlaceValueSettings {
            mode: OperationMode::Subtract,
            auto_carry: true,
            ..Default::default()
        });
        assert!(!b.press_digit(6));
        assert_eq!(b.digits(), &[0; WIDTH]);
        assert_eq!(b.marks()[6], Some(DigitMark::Rejected));
    }

    #[test]
    fn guard_only_looks_at_positions_up_to_the_target() {
        // 0000005: the hundreds and everything left of them read as zero.
        let mut b = board(NumberSystem::Decimal, true, [0, 0, 0, 0, 0, 0, 5]);
        assert!(!b.decrement_digit(4));
        assert_eq!(b.value(), 5);
        assert!(b.decrement_digit(6));
        assert_eq!(b.value(), 4);
    }

    #[test]
    fn borrow_takes_from_the_left() {
        let mut b = board(NumberSystem::Decimal, true, [0, 0, 0, 0, 1, 0, 0]);
        assert!(b.decrement_digit(6));
        assert_eq!(b.digits(), &[0, 0, 0, 0, 0, 9, 9]);
        assert_eq!(b.marks()[6], Some(DigitMark::Borrow));
        assert_eq!(b.marks()[5], Some(DigitMark::Borrow));

        let mut manual = board(NumberSystem::Decimal, false, [0, 0, 0, 0, 0, 1, 0]);
        assert!(manual.decrement_digit(6));
        assert_eq!(manual.digits(), &[0, 0, 0, 0, 0, 1, 9]);
        assert_eq!(manual.marks()[6], Some(DigitMark::Underflow));
    }

    #[test]
    fn units_position_moves_by_exactly_one() {
        let mut b = board(NumberSystem::Hex, true, [0, 0, 0, 0, 0, 0xF, 0xF]);
        let before = b.value();
        b.increment_digit(6);
        assert_eq!(b.value(), before + 1);
        b.decrement_digit(6);
        assert_eq!(b.value(), before);
    }

    #[test]
    fn auto_carry_keeps_the_value_arithmetic() {
        for system in NumberSystem::ALL {
            let mut b = PlaceValueBoard::new(settings(system, true));
            let modulus = (system.base() as u64).pow(WIDTH as u32);
            let mut rng = SplitMix64::new(system.base() as u64);
            for _ in 0..2000 {
                let pos = rng.below(WIDTH);
                let weight = b.place_weight(pos);
                let before = b.value();
                if rng.below(2) == 0 {
                    assert!(b.increment_digit(pos));
                    assert_eq!(b.value(), (before + weight) % modulus);
                } else if b.decrement_digit(pos) {
                    assert_eq!(b.value(), before - weight);
                } else {
                    assert_eq!(b.value(), before);
                    assert_eq!(b.marks()[pos], Some(DigitMark::Rejected));
                }
                assert!(b.digits().iter().all(|&d| d < system.base()));
            }
        }
    }

    #[test]
    fn changing_the_base_clamps_digits() {
        let mut b = board(NumberSystem::Hex, true, [0, 0, 0, 0, 0xA, 1, 0xF]);
        b.increment_digit(0);
        b.change_system(NumberSystem::Binary);
        assert_eq!(b.digits(), &[1, 0, 0, 0, 1, 1, 1]);
        assert!(b.marks().iter().all(Option::is_none));
        b.change_system(NumberSystem::Decimal);
        assert_eq!(b.digits(), &[1, 0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn leading_zero_mask_keeps_the_last_position() {
        let mut b = board(NumberSystem::Decimal, true, [0, 0, 0, 4, 0, 2, 0]);
        assert_eq!(b.hidden_mask(), [false; WIDTH]);
        b.settings.hide_leading_zeros = true;
        assert_eq!(b.hidden_mask(), [true, true, true, false, false, false, false]);
        b.reset();
        assert_eq!(b.hidden_mask(), [true, true, true, true, true, true, false]);
    }

    #[test]
    fn readout_shows_decimal_alongside_other_bases() {
        let b = board(NumberSystem::Decimal, false, [0, 0, 0, 0, 1, 2, 3]);
        assert_eq!(b.readout().to_string(), "123");
        let b = board(NumberSystem::Binary, false, [0, 0, 0, 0, 1, 0, 1]);
        assert_eq!(b.readout().to_string(), "101 (binär) – 5 (dezimal)");
        let b = board(NumberSystem::Hex, false, [0, 0, 0, 0, 0, 0xF, 0xF]);
        assert_eq!(b.readout().to_string(), "FF (hex) – 255 (dezimal)");
        assert_eq!(NumberSystem::Hex.format_digit(11), "B");
    }

    #[test]
    fn with_digits_rejects_out_of_range_digits() {
        assert!(PlaceValueBoard::with_digits(settings(NumberSystem::Binary, true), [0, 0, 0, 0, 0, 0, 2]).is_none());
    }

    #[test]
    fn applied_settings_clamp_digits_to_the_new_base() {
        let mut b = board(NumberSystem::Decimal, true, [0, 0, 0, 0, 0, 7, 3]);
        b.apply_settings(PlaceValueSettings {
            system: NumberSystem::Binary,
            hide_leading_zeros: true,
            ..Default::default()
        });
        assert_eq!(b.digits(), &[0, 0, 0, 0, 0, 1, 1]);
        assert!(!b.settings().auto_carry);
        assert_eq!(b.hidden_mask(), [true, true, true, true, true, false, false]);
    }

    #[test]
    fn visual_units_follow_the_toggle() {
        let mut b = board(NumberSystem::Decimal, true, [0, 0, 0, 0, 0, 0, 3]);
        assert_eq!(b.units(6), None);
        b.settings.show_visual_units = true;
        assert_eq!(b.units(6), Some(3));
        assert_eq!(b.units(WIDTH), None);
    }

    #[test]
    fn settings_serialize_in_camel_case() {
        let s = PlaceValueSettings {
            system: NumberSystem::Hex,
            mode: OperationMode::Subtract,
            auto_carry: true,
            hide_leading_zeros: true,
            show_visual_units: false,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""system":"hex""#));
        assert!(json.contains(r#""autoCarry":true"#));
        let partial: PlaceValueSettings = serde_json::from_str(r#"{"system":"binary"}"#).unwrap();
        assert_eq!(partial.system, NumberSystem::Binary);
        assert!(!partial.auto_carry);
    }

    #[test]
    fn reducer_handles_presses_and_toggles() {
        let state = Rc::new(PlaceValueBoard::default());
        let state = state.reduce(PlaceValueAction::ToggleAutoCarry);
        assert!(state.settings().auto_carry);
        let state = (0..12).fold(state, |s, _| s.reduce(PlaceValueAction::Press(6)));
        assert_eq!(state.value(), 12);
        let state = state.reduce(PlaceValueAction::SetMode(OperationMode::Subtract));
        let state = state.reduce(PlaceValueAction::Press(5));
        assert_eq!(state.value(), 2);
        let state = state.reduce(PlaceValueAction::Reset);
        assert_eq!(state.value(), 0);
        let same = state.clone().reduce(PlaceValueAction::ClearMarks);
        assert!(Rc::ptr_eq(&state, &same));
    }
}
