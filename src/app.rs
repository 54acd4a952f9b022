//! App: terminal init, main loop, gravity and key handling.

use crate::GameConfig;
use crate::game::Session;
use crate::gravity::GravityClock;
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use fastrand::Rng;
use log::info;
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Frame budget (~60 FPS); also the longest we block waiting for input.
const FRAME_DURATION: Duration = Duration::from_millis(16);

pub struct App {
    theme: Theme,
    session: Session,
    clock: GravityClock,
    last_frame: Instant,
}

impl App {
    pub fn new(config: &GameConfig, theme: Theme) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                info!("starting with seed {}", seed);
                Rng::with_seed(seed)
            }
            None => Rng::new(),
        };
        Self {
            theme,
            session: Session::new(rng),
            clock: GravityClock::new(config.drop_interval),
            last_frame: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Feed elapsed wall-clock time to gravity. Returns the number of steps applied.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        self.clock.advance(elapsed, &mut self.session)
    }

    /// Apply one decoded action. Returns false when the app should exit.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::MoveLeft => {
                self.session.try_move(-1, 0);
            }
            Action::MoveRight => {
                self.session.try_move(1, 0);
            }
            Action::SoftDrop => {
                self.session.try_move(0, 1);
            }
            Action::Rotate => {
                self.session.rotate();
            }
            Action::TogglePause => self.session.toggle_pause(),
            Action::Reset => {
                self.session.reset();
                self.clock.reset();
            }
            Action::None => {}
        }
        true
    }

    /// Decode and apply one key event. Held keys arrive as `Repeat`; only
    /// movement honours them. Returns false when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = key_to_action(key);
        let honoured = match key.kind {
            KeyEventKind::Press => true,
            KeyEventKind::Repeat => action.repeats(),
            KeyEventKind::Release => false,
        };
        !honoured || self.apply_action(action)
    }

    pub fn run(&mut self) -> Result<()> {
        // Built before the mode switch so a failure leaves the terminal untouched.
        let mut terminal = ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(std::io::stdout()))?;

        enable_raw_mode()?;
        if let Err(e) = execute!(std::io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        // Without event types the terminal's auto-repeat shows up as plain presses.
        let _ = execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );

        self.last_frame = Instant::now();
        let result = self.run_loop(&mut terminal);

        restore()?;
        terminal.show_cursor()?;

        info!("exiting with score {}", self.session.score());
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_frame);
            self.last_frame = now;

            // Due gravity steps land before the frame is drawn.
            self.tick(elapsed);
            terminal.draw(|f| crate::ui::draw(f, &self.session, &self.theme))?;

            let timeout = FRAME_DURATION.saturating_sub(now.elapsed());
            if !event::poll(timeout)? {
                continue;
            }
            while event::poll(Duration::ZERO)? {
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                if !self.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}

fn restore() -> Result<()> {
    let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}
