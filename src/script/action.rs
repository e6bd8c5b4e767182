//! Buttons, button sets and timed actions

use std::fmt;

/// Virtual controller buttons, in the bit order the engine polls them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    /// Primary action (jump)
    Jump,
    /// Secondary action (dash)
    Dash,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Jump,
        Button::Dash,
    ];

    /// Button index as passed to the engine's button query
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Canonical script letter (`z` and `c` both mean jump; `z` is written back)
    pub fn letter(self) -> char {
        match self {
            Button::Left => 'a',
            Button::Right => 'd',
            Button::Up => 'w',
            Button::Down => 's',
            Button::Jump => 'z',
            Button::Dash => 'x',
        }
    }

    /// Map a script letter to its button. Lowercase only.
    pub fn from_letter(ch: char) -> Option<Button> {
        match ch {
            'a' => Some(Button::Left),
            'd' => Some(Button::Right),
            'w' => Some(Button::Up),
            's' => Some(Button::Down),
            'z' | 'c' => Some(Button::Jump),
            'x' => Some(Button::Dash),
            _ => None,
        }
    }
}

/// Set of held buttons packed one bit per button (bits 6 and 7 always clear)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    const MASK: u8 = 0x3f;

    /// Bits outside the six buttons are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn with(mut self, button: Button) -> Self {
        self.insert(button);
        self
    }

    pub fn contains(self, button: Button) -> bool {
        self.is_held(button.index())
    }

    /// Bit test by raw index; indices past the byte are never held
    pub fn is_held(self, index: u8) -> bool {
        index < 8 && (self.0 >> index) & 0x01 == 1
    }

    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = ButtonSet::EMPTY;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

impl fmt::Display for ButtonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for button in self.iter() {
            write!(f, "{}", button.letter())?;
        }
        Ok(())
    }
}

/// Hold `keys` for `hold` ticks. `hold` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    keys: ButtonSet,
    hold: u32,
}

impl Action {
    /// A zero duration is normalized to one tick
    pub fn new(keys: ButtonSet, hold: u32) -> Self {
        Self {
            keys,
            hold: hold.max(1),
        }
    }

    pub fn keys(&self) -> ButtonSet {
        self.keys
    }

    pub fn hold(&self) -> u32 {
        self.hold
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.keys, self.hold)
    }
}

/// Total number of ticks a sequence plays for
pub fn total_ticks(actions: &[Action]) -> u64 {
    actions.iter().map(|a| a.hold() as u64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_bits_match_engine_order() {
        assert_eq!(Button::Left.bit(), 0x01);
        assert_eq!(Button::Right.bit(), 0x02);
        assert_eq!(Button::Up.bit(), 0x04);
        assert_eq!(Button::Down.bit(), 0x08);
        assert_eq!(Button::Jump.bit(), 0x10);
        assert_eq!(Button::Dash.bit(), 0x20);
    }

    #[test]
    fn test_letters() {
        assert_eq!(Button::from_letter('c'), Some(Button::Jump));
        assert_eq!(Button::from_letter('z'), Some(Button::Jump));
        assert_eq!(Button::from_letter('A'), None);
        for button in Button::ALL {
            assert_eq!(Button::from_letter(button.letter()), Some(button));
        }
    }

    #[test]
    fn test_button_set() {
        let set: ButtonSet = [Button::Dash, Button::Left].into_iter().collect();
        assert_eq!(set.bits(), 0x21);
        assert!(set.contains(Button::Left));
        assert!(!set.contains(Button::Jump));
        assert!(!set.is_held(200));
        assert_eq!(set.to_string(), "ax");
        assert_eq!(ButtonSet::EMPTY.to_string(), "-");
    }

    #[test]
    fn test_zero_hold_normalized() {
        let action = Action::new(ButtonSet::EMPTY.with(Button::Up), 0);
        assert_eq!(action.hold(), 1);
    }

    #[test]
    fn test_total_ticks() {
        let actions = [
            Action::new(ButtonSet::EMPTY, 120),
            Action::new(ButtonSet::from_bits(0x30), 1),
        ];
        assert_eq!(total_ticks(&actions), 121);
        assert_eq!(total_ticks(&[]), 0);
    }
}
