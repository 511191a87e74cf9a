use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Invoked once per display refresh with the wall-clock time since the
/// previous refresh.
pub type FrameCallback = Box<dyn FnMut(Duration)>;

/// Handle to a registered frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(u64);

/// The host's per-frame animation primitive.
///
/// A browser maps this onto `requestAnimationFrame`, a terminal onto its
/// draw loop. Callbacks stay registered until cancelled.
pub trait FrameScheduler {
    fn request(&mut self, callback: FrameCallback) -> FrameToken;

    /// Unknown or already cancelled tokens are ignored.
    fn cancel(&mut self, token: FrameToken);
}

/// Single-threaded frame scheduler driven by its owner's render loop.
#[derive(Default)]
pub struct FrameLoop {
    next_token: u64,
    callbacks: BTreeMap<FrameToken, FrameCallback>,
    last_fire: Option<Instant>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered callbacks.
    pub fn pending(&self) -> usize {
        self.callbacks.len()
    }

    /// Run every registered callback once with `delta`. Returns how many ran.
    pub fn fire(&mut self, delta: Duration) -> usize {
        for callback in self.callbacks.values_mut() {
            callback(delta);
        }

        self.callbacks.len()
    }

    /// Like [`FrameLoop::fire`], with the delta measured since the previous
    /// call. The first call fires with a zero delta.
    pub fn fire_at(&mut self, now: Instant) -> usize {
        let delta = self
            .last_fire
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();

        self.last_fire = Some(now);
        self.fire(delta)
    }
}

impl FrameScheduler for FrameLoop {
    fn request(&mut self, callback: FrameCallback) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.callbacks.insert(token, callback);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        self.callbacks.remove(&token);
    }
}

impl fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("pending", &self.callbacks.len())
            .field("last_fire", &self.last_fire)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn counter(frames: &mut FrameLoop) -> (FrameToken, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let token = frames.request(Box::new(move |_| seen.set(seen.get() + 1)));
        (token, hits)
    }

    #[test]
    fn fires_every_registered_callback() {
        let mut frames = FrameLoop::new();
        let (_, a) = counter(&mut frames);
        let (_, b) = counter(&mut frames);

        assert_eq!(frames.fire(Duration::from_millis(16)), 2);
        assert_eq!(frames.fire(Duration::from_millis(16)), 2);
        assert_eq!((a.get(), b.get()), (2, 2));
    }

    #[test]
    fn cancelled_callback_never_runs_again() {
        let mut frames = FrameLoop::new();
        let (token, hits) = counter(&mut frames);

        frames.fire(Duration::ZERO);
        frames.cancel(token);
        frames.cancel(token);

        assert_eq!(frames.fire(Duration::ZERO), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn fire_at_measures_deltas() {
        let mut frames = FrameLoop::new();
        let seen = Rc::new(Cell::new(Duration::MAX));
        let sink = seen.clone();
        frames.request(Box::new(move |delta| sink.set(delta)));

        let start = Instant::now();
        frames.fire_at(start);
        assert_eq!(seen.get(), Duration::ZERO);

        frames.fire_at(start + Duration::from_millis(20));
        assert_eq!(seen.get(), Duration::from_millis(20));
    }
}
