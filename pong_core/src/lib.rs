//! Two-paddle Pong on a 240x160 indexed-color, double-buffered display.
//!
//! The core is platform independent: everything that touches hardware goes
//! through [`DisplayPort`] and [`InputPort`], and [`MatchController::step`]
//! runs exactly one frame per call.

pub mod components;
pub mod controller;
pub mod display;
pub mod error;
pub mod fsm;
pub mod glyphs;
pub mod input;
pub mod palette;
pub mod params;
pub mod resources;
pub mod surface;
pub mod systems;

pub use components::*;
pub use controller::MatchController;
pub use display::{DisplayControl, DisplayPort, DrawTarget, FrameBuffers, FramePacer, Page};
pub use error::{Error, Result};
pub use fsm::{MatchAction, MatchFsm, MatchState};
pub use input::{Button, Buttons, InputPort};
pub use palette::{ColorIndex, Palette, Rgb15};
pub use params::*;
pub use resources::*;
pub use surface::{Rect, Surface};

/// Everything a platform provides to run a match
pub trait Platform: DisplayPort + InputPort {}

impl<T: DisplayPort + InputPort + ?Sized> Platform for T {}
