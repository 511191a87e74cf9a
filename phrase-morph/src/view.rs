use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::config::MorphConfig;
use crate::engine::{MorphEngine, MorphState};
use crate::error::MorphError;
use crate::frame::MorphFrame;
use crate::scheduler::{FrameScheduler, FrameToken};

/// One mounted morphing-text element.
///
/// Owns at most one engine and at most one frame callback. `start` mounts,
/// `stop` unmounts; the engine only advances from the scheduler's callback.
#[derive(Debug, Default)]
pub struct MorphingText {
    config: MorphConfig,
    mounted: Option<Mounted>,
}

#[derive(Debug)]
struct Mounted {
    token: FrameToken,
    engine: Rc<RefCell<MorphEngine>>,
}

impl MorphingText {
    pub fn new(config: MorphConfig) -> Self {
        Self {
            config,
            mounted: None,
        }
    }

    /// Begin cycling through `phrases` on `scheduler`'s frame clock.
    ///
    /// An invalid phrase list schedules nothing and leaves any running cycle
    /// untouched. A valid one replaces the running cycle, cancelling its
    /// callback first.
    pub fn start<S, I, P>(&mut self, scheduler: &mut S, phrases: I) -> Result<(), MorphError>
    where
        S: FrameScheduler + ?Sized,
        I: IntoIterator<Item = P>,
        P: Into<Arc<str>>,
    {
        let engine = Rc::new(RefCell::new(MorphEngine::new(phrases, self.config)?));

        self.stop(scheduler);

        let ticking = engine.clone();
        let token = scheduler.request(Box::new(move |delta| {
            ticking.borrow_mut().tick(delta);
        }));

        debug!(?token, "morphing text started");
        self.mounted = Some(Mounted { token, engine });

        Ok(())
    }

    /// Cancel the frame callback. Idempotent, and a no-op before `start`.
    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if let Some(mounted) = self.mounted.take() {
            scheduler.cancel(mounted.token);
            debug!(token = ?mounted.token, "morphing text stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted.is_some()
    }

    /// The frame to draw now, or `None` while stopped.
    pub fn frame(&self) -> Option<MorphFrame> {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.engine.borrow().frame())
    }

    pub fn state(&self) -> Option<MorphState> {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.engine.borrow().state())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::frame::Phase;
    use crate::scheduler::FrameLoop;

    use super::*;

    fn advance(frames: &mut FrameLoop, seconds: f64, step: f64) {
        let ticks = (seconds / step).round() as usize;

        for _ in 0..ticks {
            frames.fire(Duration::from_secs_f64(step));
        }
    }

    #[test]
    fn empty_list_schedules_nothing() {
        let mut frames = FrameLoop::new();
        let mut text = MorphingText::default();

        let result = text.start(&mut frames, Vec::<&str>::new());

        assert!(matches!(result, Err(MorphError::InvalidInput(_))));
        assert_eq!(frames.fire(Duration::from_millis(16)), 0);
        assert!(!text.is_running());
        assert_eq!(text.frame(), None);
    }

    #[test]
    fn stop_is_idempotent_and_safe_before_start() {
        let mut frames = FrameLoop::new();
        let mut text = MorphingText::default();

        text.stop(&mut frames);
        text.start(&mut frames, ["a", "b"]).unwrap();
        text.stop(&mut frames);
        text.stop(&mut frames);

        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.fire(Duration::from_millis(16)), 0);
    }

    #[test]
    fn restart_keeps_a_single_callback() {
        let mut frames = FrameLoop::new();
        let mut text = MorphingText::default();

        text.start(&mut frames, ["a", "b"]).unwrap();
        text.start(&mut frames, ["c", "d"]).unwrap();

        assert_eq!(frames.pending(), 1);
        assert_eq!(&*text.frame().unwrap().outgoing.text, "c");
    }

    #[test]
    fn failed_restart_keeps_running_cycle() {
        let mut frames = FrameLoop::new();
        let mut text = MorphingText::default();

        text.start(&mut frames, ["a", "b"]).unwrap();
        assert!(text.start(&mut frames, Vec::<&str>::new()).is_err());

        assert!(text.is_running());
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn plan_track_grow_on_a_sixty_hertz_clock() {
        let mut frames = FrameLoop::new();
        let mut text = MorphingText::new(MorphConfig::HERO);
        text.start(&mut frames, ["Plan", "Track", "Grow"]).unwrap();

        let frame = text.frame().unwrap();
        assert_eq!((&*frame.outgoing.text, frame.outgoing.opacity), ("Plan", 100.0));
        assert_eq!((&*frame.incoming.text, frame.incoming.opacity), ("Track", 0.0));

        advance(&mut frames, 4.0, 0.015625);
        let frame = text.frame().unwrap();
        assert_eq!(frame.phase, Phase::Morph);
        assert!((frame.incoming.opacity - 75.8).abs() < 0.1);
        assert!((frame.outgoing.opacity - 75.8).abs() < 0.1);

        advance(&mut frames, 1.0, 0.015625);
        let state = text.state().unwrap();
        assert_eq!(state.current_index, 1);
        assert_eq!(state.cooldown_remaining, Duration::from_secs(3));

        let frame = text.frame().unwrap();
        assert_eq!((&*frame.outgoing.text, &*frame.incoming.text), ("Track", "Grow"));
    }

    #[test]
    fn stopped_view_ignores_later_frames() {
        let mut frames = FrameLoop::new();
        let mut text = MorphingText::default();
        text.start(&mut frames, ["a", "b"]).unwrap();

        advance(&mut frames, 1.0, 0.5);
        text.stop(&mut frames);
        advance(&mut frames, 10.0, 0.5);

        assert_eq!(text.state(), None);
        assert_eq!(frames.pending(), 0);
    }
}
