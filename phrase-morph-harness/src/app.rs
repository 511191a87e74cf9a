use std::time::Instant;

use crossterm::event::KeyCode;
use phrase_morph::{FrameLoop, MorphConfig, MorphError, MorphingText};
use tracing::debug;

use crate::session::UiSession;

pub enum Control {
    Continue,
    Quit,
}

/// Everything the event loop mutates between frames.
pub struct App {
    pub session: UiSession,
    pub config: MorphConfig,
    pub text: MorphingText,
    frames: FrameLoop,
    /// Phrases given on the command line; they win over the locale bundle.
    pinned: Vec<String>,
}

impl App {
    pub fn new(session: UiSession, config: MorphConfig, pinned: Vec<String>) -> Self {
        Self {
            session,
            config,
            text: MorphingText::new(config),
            frames: FrameLoop::new(),
            pinned,
        }
    }

    pub fn phrases(&self) -> &[String] {
        if self.pinned.is_empty() {
            &self.session.bundle().morph
        } else {
            &self.pinned
        }
    }

    /// Mount the morphing text with the current phrases.
    pub fn start(&mut self) -> Result<(), MorphError> {
        let phrases = self.phrases().to_vec();
        self.text.start(&mut self.frames, phrases)
    }

    pub fn stop(&mut self) {
        self.text.stop(&mut self.frames);
    }

    pub fn is_paused(&self) -> bool {
        !self.text.is_running()
    }

    /// Advance every mounted animation to `now`.
    pub fn on_frame(&mut self, now: Instant) {
        self.frames.fire_at(now);
    }

    pub fn handle_key(&mut self, code: KeyCode) -> anyhow::Result<Control> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),

            KeyCode::Char(' ') => {
                if self.is_paused() {
                    self.start()?;
                } else {
                    self.stop();
                }
            }

            KeyCode::Char('l') => {
                let next = self.session.locale().next();

                if self.session.switch_locale(next)? && !self.is_paused() {
                    self.start()?;
                }
            }

            other => debug!(?other, "unbound key"),
        }

        Ok(Control::Continue)
    }
}
