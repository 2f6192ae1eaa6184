//! Physical buttons on the wearable

/// A single device button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Top right button
    Up,
    /// Middle right button
    Select,
    /// Bottom right button
    Down,
}

// Wire format values
const BUTTON_UP: u8 = 0x01;
const BUTTON_SELECT: u8 = 0x02;
const BUTTON_DOWN: u8 = 0x04;

const KNOWN_BITS: u8 = BUTTON_UP | BUTTON_SELECT | BUTTON_DOWN;

impl Button {
    /// Every button, in wire bit order
    pub const ALL: [Button; 3] = [Button::Up, Button::Select, Button::Down];

    /// Wire bit for this button
    pub const fn bit(self) -> u8 {
        match self {
            Button::Up => BUTTON_UP,
            Button::Select => BUTTON_SELECT,
            Button::Down => BUTTON_DOWN,
        }
    }
}

/// Set of buttons pressed simultaneously
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u8);

impl ButtonMask {
    /// Mask with no buttons
    pub const EMPTY: ButtonMask = ButtonMask(0);

    /// Parse a mask from its wire byte
    ///
    /// Returns `None` if any bit does not name a known button.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !KNOWN_BITS != 0 {
            return None;
        }
        Some(ButtonMask(bits))
    }

    /// Mask holding a single button
    pub const fn single(button: Button) -> Self {
        ButtonMask(button.bit())
    }

    /// Wire byte for this mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Add a button to the set
    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, button: Button) -> Self {
        self.insert(button);
        self
    }

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the pressed buttons in wire bit order
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

impl From<Button> for ButtonMask {
    fn from(button: Button) -> Self {
        ButtonMask::single(button)
    }
}

impl FromIterator<Button> for ButtonMask {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(ButtonMask::EMPTY, ButtonMask::with)
    }
}
