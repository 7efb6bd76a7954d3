//! Button state
//!
//! The key register reports the ten buttons active-low: a clear bit means
//! the button is held. [`Buttons`] stores them active-high.

/// Button bits in key register order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Button {
    A = 1 << 0,
    B = 1 << 1,
    Select = 1 << 2,
    Start = 1 << 3,
    Right = 1 << 4,
    Left = 1 << 5,
    Up = 1 << 6,
    Down = 1 << 7,
    R = 1 << 8,
    L = 1 << 9,
}

/// Set of held buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Buttons(pub u16);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);

    /// Mask of the ten bits the register defines
    pub const MASK: u16 = 0x03ff;

    /// Decode a raw active-low key register read
    pub const fn from_key_register(raw: u16) -> Self {
        Buttons(!raw & Self::MASK)
    }

    pub const fn contains(self, button: Button) -> bool {
        (self.0 & button as u16) != 0
    }

    pub const fn with(self, button: Button) -> Self {
        Buttons(self.0 | button as u16)
    }

    pub const fn up(self) -> bool {
        self.contains(Button::Up)
    }

    pub const fn down(self) -> bool {
        self.contains(Button::Down)
    }

    /// Either vertical direction held; this is what serves the ball
    pub const fn any_vertical(self) -> bool {
        self.up() || self.down()
    }
}

impl From<Button> for Buttons {
    fn from(button: Button) -> Self {
        Buttons(button as u16)
    }
}

impl std::ops::BitOr for Button {
    type Output = Buttons;

    fn bitor(self, other: Button) -> Buttons {
        Buttons(self as u16 | other as u16)
    }
}

impl std::ops::BitOr<Button> for Buttons {
    type Output = Buttons;

    fn bitor(self, other: Button) -> Buttons {
        self.with(other)
    }
}

/// Input half of the hardware port
pub trait InputPort {
    /// Snapshot of the held buttons, read once per frame
    fn buttons(&mut self) -> Buttons;

    fn is_button_pressed(&mut self, button: Button) -> bool {
        self.buttons().contains(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_register_is_active_low() {
        let idle = Buttons::from_key_register(0x03ff);
        assert_eq!(idle, Buttons::NONE, "All bits set means nothing held");

        let down = Buttons::from_key_register(0x03ff & !(Button::Down as u16));
        assert!(down.down());
        assert!(!down.up());
    }

    #[test]
    fn test_key_register_ignores_high_bits() {
        let buttons = Buttons::from_key_register(0x0000);
        assert_eq!(buttons.0, Buttons::MASK);
    }

    #[test]
    fn test_button_combinations() {
        let both = Button::Up | Button::Down;
        assert!(both.up() && both.down());
        assert!(both.any_vertical());
        assert!(!Buttons::from(Button::A).any_vertical());
        assert!((Buttons::NONE | Button::Left).contains(Button::Left));
    }
}
