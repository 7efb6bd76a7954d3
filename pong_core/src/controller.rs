//! Match controller: one call to [`MatchController::step`] per display frame

use tracing::info;

use crate::components::{Ball, Paddle};
use crate::display::{self, DisplayControl, DisplayPort, DrawTarget, FrameBuffers, Page};
use crate::error::Result;
use crate::fsm::{MatchAction, MatchFsm, MatchState};
use crate::input::Buttons;
use crate::palette::Palette;
use crate::params::Config;
use crate::resources::{Events, Player, Score};
use crate::systems::{self, AiMove, Colors, Footprints};
use crate::Platform;

/// Owns the whole match: both pages, the palette, the three sprites, the
/// score and the match state machine.
#[derive(Debug)]
pub struct MatchController {
    buffers: FrameBuffers,
    target: DrawTarget,
    /// Footprints last drawn into each page, indexed by [`Page::index`]
    drawn: [Option<Footprints>; 2],
    palette: Palette,
    colors: Colors,
    user: Paddle,
    ai: Paddle,
    ball: Ball,
    score: Score,
    fsm: MatchFsm,
    ai_move: AiMove,
    events: Events,
    frame: u64,
}

impl MatchController {
    /// Set the display mode, allocate the palette and clear both pages
    pub fn new<P: DisplayPort + ?Sized>(port: &mut P, config: &Config) -> Result<Self> {
        let mut palette = Palette::new();
        let colors = Colors::allocate(&mut palette, port, config)?;
        let (buffers, target) = FrameBuffers::new(DisplayControl::MODE4_BG2, colors.background);

        port.set_display_control(buffers.control());
        port.present(buffers.visible());
        info!(colors = palette.len(), "match ready");

        Ok(Self {
            buffers,
            target,
            drawn: [None, None],
            palette,
            colors,
            user: Paddle::user(colors.user_paddle),
            ai: Paddle::ai(colors.ai_paddle),
            ball: Ball::new(colors.ball),
            score: Score::new(),
            fsm: MatchFsm::new(),
            ai_move: AiMove::default(),
            events: Events::new(),
            frame: 0,
        })
    }

    /// Run one frame and return the match state afterwards
    pub fn step<P: Platform + ?Sized>(&mut self, port: &mut P) -> MatchState {
        if let Some(winner) = self.fsm.pending_winner() {
            self.show_winner(winner, port);
            return self.fsm.state();
        }
        if !self.fsm.is_live() {
            return self.fsm.state();
        }

        self.events.clear();
        self.erase();

        let buttons = port.buttons();
        self.simulate(buttons);

        self.draw();
        self.present(port);
        self.fsm.state()
    }

    fn simulate(&mut self, buttons: Buttons) {
        if systems::try_serve(&mut self.ball, buttons, &mut self.events) {
            // Only the first serve changes the match state
            self.fsm.transition(MatchAction::Serve);
        }
        systems::advance(&mut self.ball, &self.user, &self.ai, &mut self.events);
        systems::check_scoring(&mut self.ball, &mut self.score, &mut self.events);
        systems::check_winner(&self.score, &mut self.fsm, &mut self.events);

        self.ai_move = systems::move_ai_paddle(&mut self.ai, &self.ball, self.ai_move);
        systems::apply_user_input(&mut self.user, buttons);
    }

    /// Clear the sprite boxes this page showed two frames ago
    fn erase(&mut self) {
        let page = self.target.page().index();
        if let Some(previous) = self.drawn[page].take() {
            let surface = self.buffers.target_mut(&self.target);
            systems::erase(surface, &previous, self.colors.background);
        }
    }

    fn draw(&mut self) {
        let page = self.target.page().index();
        let surface = self.buffers.target_mut(&self.target);
        let footprints = systems::draw_scene(
            surface,
            &self.user,
            &self.ai,
            &self.ball,
            &self.score,
            &self.colors,
        );
        self.drawn[page] = Some(footprints);
    }

    fn present<P: DisplayPort + ?Sized>(&mut self, port: &mut P) {
        let vblank = display::wait_vblank(port);
        self.buffers.swap(&mut self.target, vblank, port);
        self.frame += 1;
    }

    fn show_winner<P: DisplayPort + ?Sized>(&mut self, winner: Player, port: &mut P) {
        self.events.clear();
        self.erase();
        self.draw();
        let surface = self.buffers.target_mut(&self.target);
        systems::draw_banner(surface, winner, &self.colors);
        self.present(port);

        self.fsm.transition(MatchAction::BannerShown);
        info!(?winner, frame = self.frame, "banner shown, match frozen");
    }

    pub fn state(&self) -> MatchState {
        self.fsm.state()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Direct access for setting up positions
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn user_paddle(&self) -> &Paddle {
        &self.user
    }

    pub fn user_paddle_mut(&mut self) -> &mut Paddle {
        &mut self.user
    }

    pub fn ai_paddle(&self) -> &Paddle {
        &self.ai
    }

    pub fn ai_move(&self) -> AiMove {
        self.ai_move
    }

    /// What happened during the last frame
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    /// Page the next frame will be drawn into
    pub fn draw_page(&self) -> Page {
        self.target.page()
    }

    /// Frames presented so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
