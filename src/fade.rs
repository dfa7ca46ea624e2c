//! Frame-stepped opacity fades.

/// Direction of an opacity fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    /// Towards opacity 1
    In,
    /// Towards opacity 0
    Out,
}

/// Outcome of advancing a fade by one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FadeTick<C> {
    /// No fade is running
    Idle,
    /// Opacity moved; more frames are needed
    Running(f64),
    /// Opacity crossed the bound on this frame. Carries the completion
    /// payload, handed out exactly once.
    Finished(f64, C),
}

#[derive(Clone, Debug)]
struct ActiveFade<C> {
    direction: FadeDirection,
    opacity: f64,
    steps: u32,
    on_complete: C,
}

/// A cancellable opacity fade driven one frame at a time.
///
/// Like the rest of the crate this does no timing of its own: call
/// [`tick`](Self::tick) once per animation frame while
/// [`is_running`](Self::is_running) is true. Each tick moves the opacity by a
/// fixed step; the tick that crosses the bound returns
/// [`FadeTick::Finished`] with the completion payload given to
/// [`start`](Self::start). The final opacity may land slightly outside
/// `[0, 1]`.
///
/// ## Example
///
/// ```rust
/// use gallery_stack_view::{Fade, FadeDirection, FadeTick};
///
/// let mut fade = Fade::new(0.08, 0.03);
/// fade.start(FadeDirection::In, 0.0, "opened");
///
/// let mut frames = 0;
/// let done = loop {
///     frames += 1;
///     if let FadeTick::Finished(_, tag) = fade.tick() {
///         break tag;
///     }
/// };
/// assert_eq!(done, "opened");
/// assert_eq!(frames, 13);
/// assert!(!fade.is_running());
/// ```
#[derive(Clone, Debug)]
pub struct Fade<C> {
    in_step: f64,
    out_step: f64,
    active: Option<ActiveFade<C>>,
}

impl<C> Fade<C> {
    /// Create an idle fade with the given per-frame steps.
    pub fn new(in_step: f64, out_step: f64) -> Self {
        Self {
            in_step,
            out_step,
            active: None,
        }
    }

    /// Begin fading from `opacity`, replacing any fade in progress.
    ///
    /// A replaced fade never completes.
    pub fn start(&mut self, direction: FadeDirection, opacity: f64, on_complete: C) {
        self.active = Some(ActiveFade {
            direction,
            opacity,
            steps: 0,
            on_complete,
        });
    }

    /// Stop the fade in progress without completing it.
    ///
    /// Returns the opacity it had reached, if a fade was running.
    pub fn cancel(&mut self) -> Option<f64> {
        self.active.take().map(|fade| fade.opacity)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> FadeTick<C> {
        let Some(fade) = self.active.as_mut() else {
            return FadeTick::Idle;
        };

        fade.steps += 1;
        let crossed = match fade.direction {
            FadeDirection::In => {
                fade.opacity += self.in_step;
                fade.opacity >= 1.0
            }
            FadeDirection::Out => {
                fade.opacity -= self.out_step;
                fade.opacity <= 0.0
            }
        };

        if !crossed {
            return FadeTick::Running(fade.opacity);
        }

        match self.active.take() {
            Some(done) => {
                log::trace!("fade {:?} finished after {} frames", done.direction, done.steps);
                FadeTick::Finished(done.opacity, done.on_complete)
            }
            None => FadeTick::Idle,
        }
    }
}
