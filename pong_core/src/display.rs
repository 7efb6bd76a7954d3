//! Display synchronisation and double buffering
//!
//! Two pages exist at all times. One is shown by the display, the other is
//! the draw target. The draw target is only reachable through the single
//! [`DrawTarget`] token returned by [`FrameBuffers::new`], which
//! [`FrameBuffers::swap`] re-points at the newly hidden page. A swap needs
//! a [`VBlank`] token that only [`wait_vblank`] produces. Drawing into the visible page and flipping
//! outside vertical blank are therefore both unrepresentable.
//!
//! ```
//! use pong_core::display::{self, DisplayControl, FrameBuffers};
//! # use pong_core::display::DisplayPort;
//! # use pong_core::palette::{ColorIndex, Rgb15};
//! # use pong_core::surface::Surface;
//! # struct Port;
//! # impl DisplayPort for Port {
//! #     fn set_display_control(&mut self, _: DisplayControl) {}
//! #     fn set_palette_entry(&mut self, _: ColorIndex, _: Rgb15) {}
//! #     fn wait_vblank(&mut self) {}
//! #     fn present(&mut self, _: &Surface) {}
//! # }
//! # let mut port = Port;
//! let (mut buffers, mut target) = FrameBuffers::new(DisplayControl::MODE4_BG2, ColorIndex(0));
//! buffers.target_mut(&target).put_pixel(80, 120, ColorIndex(1)).unwrap();
//! let vblank = display::wait_vblank(&mut port);
//! buffers.swap(&mut target, vblank, &mut port);
//! assert_ne!(target.page(), buffers.visible_page());
//! ```

use std::thread;
use std::time::{Duration, Instant};

use crate::palette::{ColorIndex, Rgb15};
use crate::surface::Surface;

/// Display control register value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct DisplayControl(pub u16);

impl DisplayControl {
    /// Bitmap mode 4: 8-bit indexed, two pages
    pub const MODE4: u16 = 0x0004;
    /// Show the back page instead of the front page
    pub const SHOW_BACK: u16 = 0x0010;
    /// Background layer 2 enable
    pub const BG2: u16 = 0x0400;

    /// The only mode this game uses
    pub const MODE4_BG2: DisplayControl = DisplayControl(Self::MODE4 | Self::BG2);

    pub const fn contains(self, bits: u16) -> bool {
        (self.0 & bits) == bits
    }

    /// Page selected by the SHOW_BACK bit
    pub const fn shown_page(self) -> Page {
        if self.contains(Self::SHOW_BACK) {
            Page::Back
        } else {
            Page::Front
        }
    }

    /// Same register value with only the page bit changed
    pub const fn showing(self, page: Page) -> Self {
        match page {
            Page::Front => DisplayControl(self.0 & !Self::SHOW_BACK),
            Page::Back => DisplayControl(self.0 | Self::SHOW_BACK),
        }
    }
}

/// One of the two physical pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Front,
    Back,
}

impl Page {
    pub const fn other(self) -> Page {
        match self {
            Page::Front => Page::Back,
            Page::Back => Page::Front,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Page::Front => 0,
            Page::Back => 1,
        }
    }
}

/// Display half of the hardware port
pub trait DisplayPort {
    /// Write the display control register (mode setup and page select)
    fn set_display_control(&mut self, control: DisplayControl);

    /// Write one palette memory entry
    fn set_palette_entry(&mut self, index: ColorIndex, color: Rgb15);

    /// Block until the display has finished the visible rows of this frame
    fn wait_vblank(&mut self);

    /// Scan out the page that was just made visible
    fn present(&mut self, surface: &Surface);
}

/// Proof that the caller has just waited for vertical blank
#[derive(Debug)]
pub struct VBlank {
    _private: (),
}

/// Wait for vertical blank and return the token that allows one swap
pub fn wait_vblank<P: DisplayPort + ?Sized>(port: &mut P) -> VBlank {
    port.wait_vblank();
    VBlank { _private: () }
}

/// Exclusive right to draw into the hidden page. Not `Clone`: exactly one
/// exists per [`FrameBuffers`].
#[derive(Debug, PartialEq, Eq)]
pub struct DrawTarget {
    page: Page,
}

impl DrawTarget {
    pub fn page(&self) -> Page {
        self.page
    }
}

/// The two pages plus the display control word that selects between them
#[derive(Debug)]
pub struct FrameBuffers {
    pages: [Surface; 2],
    control: DisplayControl,
}

impl FrameBuffers {
    /// Both pages cleared to `background`; the front page is shown and the
    /// back page is the first draw target.
    pub fn new(mode: DisplayControl, background: ColorIndex) -> (Self, DrawTarget) {
        let buffers = Self {
            pages: [Surface::new(background), Surface::new(background)],
            control: mode.showing(Page::Front),
        };
        (buffers, DrawTarget { page: Page::Back })
    }

    pub fn control(&self) -> DisplayControl {
        self.control
    }

    pub fn visible_page(&self) -> Page {
        self.control.shown_page()
    }

    pub fn visible(&self) -> &Surface {
        &self.pages[self.visible_page().index()]
    }

    pub fn surface(&self, page: Page) -> &Surface {
        &self.pages[page.index()]
    }

    /// Mutable access to the hidden page
    pub fn target_mut(&mut self, target: &DrawTarget) -> &mut Surface {
        debug_assert_ne!(target.page, self.visible_page());
        &mut self.pages[target.page.index()]
    }

    /// Show the page that was being drawn; `target` then names the other one
    pub fn swap<P: DisplayPort + ?Sized>(
        &mut self,
        target: &mut DrawTarget,
        _vblank: VBlank,
        port: &mut P,
    ) {
        let shown = target.page;
        self.control = self.control.showing(shown);
        port.set_display_control(self.control);
        port.present(&self.pages[shown.index()]);
        target.page = shown.other();
    }
}

/// Fixed-rate frame pacing for hosted ports
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Instant,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now() + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next frame deadline. A late caller is not made to
    /// catch up: the schedule restarts from now.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.interval;
        } else {
            self.next = now + self.interval;
        }
    }
}
