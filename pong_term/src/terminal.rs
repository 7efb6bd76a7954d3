//! Display and input port over an ANSI terminal
//!
//! Each character cell shows two sampled pixel rows with an upper half
//! block: the top pixel as foreground, the bottom one as background.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
    EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use pong_core::{
    Buttons, ColorIndex, DisplayControl, DisplayPort, FramePacer, InputPort, Params, Rgb15,
    Surface,
};
use tracing::{debug, info, trace, warn};

use crate::config::TermConfig;
use crate::input::{self, HeldKeys, KeyAction, HOLD_WINDOW};

const HALF_BLOCK: char = '▀';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        fg: Color::Black,
        bg: Color::Black,
    };
}

/// Current and last flushed cell grids
#[derive(Debug, Clone)]
pub struct Screen {
    scale: u16,
    cols: u16,
    rows: u16,
    cur: Vec<Cell>,
    /// `None` forces the cell out on the next flush
    prev: Vec<Option<Cell>>,
}

impl Screen {
    pub fn new(scale: u16) -> Self {
        let scale = scale.max(1);
        let cols = Params::SCREEN_WIDTH as u16 / scale;
        let rows = Params::SCREEN_HEIGHT as u16 / (2 * scale);
        let len = usize::from(cols) * usize::from(rows);
        Self {
            scale,
            cols,
            rows,
            cur: vec![Cell::BLANK; len],
            prev: vec![None; len],
        }
    }

    /// Terminal cells needed, (columns, rows)
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    #[cfg(test)]
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(self.cur[usize::from(y) * usize::from(self.cols) + usize::from(x)])
    }

    /// Resample the cell grid from a page
    pub fn sample(&mut self, surface: &Surface, palette: &[Color; 256]) {
        let scale = i32::from(self.scale);
        let color_at = |row: i32, col: i32| {
            surface
                .pixel(row, col)
                .map_or(Color::Black, |ColorIndex(index)| palette[usize::from(index)])
        };
        for y in 0..self.rows {
            let top = i32::from(y) * 2 * scale;
            for x in 0..self.cols {
                let col = i32::from(x) * scale;
                let i = usize::from(y) * usize::from(self.cols) + usize::from(x);
                self.cur[i] = Cell {
                    fg: color_at(top, col),
                    bg: color_at(top + scale, col),
                };
            }
        }
    }

    /// Number of cells that differ from what was last flushed
    pub fn pending(&self) -> usize {
        self.cur
            .iter()
            .zip(&self.prev)
            .filter(|(cur, prev)| Some(**cur) != **prev)
            .count()
    }

    pub fn invalidate(&mut self) {
        self.prev.fill(None);
    }

    /// Emit only the changed cells, inside one synchronized update
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        queue!(out, BeginSynchronizedUpdate)?;
        let mut cur_fg = None::<Color>;
        let mut cur_bg = None::<Color>;

        for y in 0..self.rows {
            let row_off = usize::from(y) * usize::from(self.cols);
            for x in 0..self.cols {
                let i = row_off + usize::from(x);
                let cell = self.cur[i];
                if self.prev[i] == Some(cell) {
                    continue;
                }
                queue!(out, cursor::MoveTo(x, y))?;
                if cur_fg != Some(cell.fg) {
                    queue!(out, SetForegroundColor(cell.fg))?;
                    cur_fg = Some(cell.fg);
                }
                if cur_bg != Some(cell.bg) {
                    queue!(out, SetBackgroundColor(cell.bg))?;
                    cur_bg = Some(cell.bg);
                }
                queue!(out, Print(HALF_BLOCK))?;
                self.prev[i] = Some(cell);
            }
        }

        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()
    }
}

fn to_color(color: Rgb15) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb { r, g, b }
}

pub struct TerminalPort {
    out: Stdout,
    screen: Screen,
    palette: [Color; 256],
    pacer: FramePacer,
    keys: HeldKeys,
    raw: bool,
    enhanced: bool,
    quit: bool,
    failure: Option<io::Error>,
}

impl TerminalPort {
    /// Check the terminal is big enough, then switch to raw mode on the
    /// alternate screen. Dropping the port restores the terminal.
    pub fn new(config: &TermConfig) -> Result<Self> {
        let screen = Screen::new(config.scale);
        let (cols, rows) = screen.size();
        let (width, height) = terminal::size()?;
        if width < cols || height < rows {
            bail!(
                "terminal is {width}x{height} but the field needs {cols}x{rows}; \
                 enlarge it or raise PONG_SCALE"
            );
        }

        let mut port = Self {
            out: io::stdout(),
            screen,
            palette: [Color::Black; 256],
            pacer: FramePacer::new(config.core.frame_interval()),
            keys: HeldKeys::new(Some(HOLD_WINDOW)),
            raw: false,
            enhanced: false,
            quit: false,
            failure: None,
        };
        port.enter()?;
        info!(cols, rows, scale = config.scale, enhanced = port.enhanced, "terminal ready");
        Ok(port)
    }

    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        execute!(
            self.out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;

        // Release events make held keys exact; without them presses expire
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            self.enhanced = true;
            self.keys = HeldKeys::new(None);
        }
        Ok(())
    }

    /// Drain pending terminal events without blocking
    pub fn poll_events(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    let action = input::handle_key(key);
                    if action == KeyAction::Quit {
                        self.quit = true;
                    }
                    self.keys.apply(action, Instant::now());
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "resize");
                    execute!(self.out, terminal::Clear(terminal::ClearType::All))?;
                    self.screen.invalidate();
                    self.screen.flush(&mut self.out)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Keep frame pacing when the match has nothing left to present
    pub fn idle(&mut self) {
        self.pacer.wait();
    }

    /// Report the first write error hit while presenting, if any
    pub fn take_failure(&mut self) -> io::Result<()> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl DisplayPort for TerminalPort {
    fn set_display_control(&mut self, control: DisplayControl) {
        if !control.contains(DisplayControl::MODE4_BG2.0) {
            warn!(control = control.0, "unsupported display mode");
        }
        debug!(page = ?control.shown_page(), "page select");
    }

    fn set_palette_entry(&mut self, index: ColorIndex, color: Rgb15) {
        self.palette[usize::from(index.0)] = to_color(color);
    }

    fn wait_vblank(&mut self) {
        self.pacer.wait();
    }

    fn present(&mut self, surface: &Surface) {
        self.screen.sample(surface, &self.palette);
        trace!(cells = self.screen.pending(), "present");
        if let Err(err) = self.screen.flush(&mut self.out) {
            self.failure.get_or_insert(err);
        }
    }
}

impl InputPort for TerminalPort {
    fn buttons(&mut self) -> Buttons {
        self.keys.buttons(Instant::now())
    }
}

impl Drop for TerminalPort {
    fn drop(&mut self) {
        if !self.raw {
            return;
        }
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            EnableLineWrap,
            cursor::Show,
            LeaveAlternateScreen,
            ResetColor
        );
        let _ = terminal::disable_raw_mode();
    }
}
