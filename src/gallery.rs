//! Gallery transition controller.

use crate::layout::ChromeLayout;
use crate::surface::{NavState, Surface};
use crate::{
    CarouselState, Fade, FadeDirection, FadeTick, GalleryConfig, Item, LayoutEngine, Rect, Size,
    Throttle, VisualParams,
};

/// Error type for gallery construction and the DOM backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalleryError {
    /// A gallery needs at least one item
    #[error("gallery has no items")]
    Empty,
    /// Fade steps must be positive and finite
    #[error("invalid fade step {0}: must be positive and finite")]
    InvalidFadeStep(f64),
    /// The DOM backend could not build or reach an element
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Overlay lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionState {
    /// Overlay hidden
    #[default]
    Closed,
    /// Overlay fading in; navigation is not accepted yet
    Opening,
    /// Overlay shown and reacting to navigation and resizes
    Opened,
    /// Overlay fading out after a close
    Closing,
}

/// What to do when the overlay fade finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FadeDone {
    Open,
    Close,
}

#[derive(Clone, Copy, Debug)]
struct SummarySwap {
    due_ms: f64,
    index: usize,
}

/// Perspective-stack gallery overlay.
///
/// The gallery owns navigation state and decides every visual change, but
/// does no drawing or timing itself. Entry points take a [`Surface`] to
/// apply changes to; the host drives animation by calling
/// [`on_frame`](Self::on_frame) each animation frame while
/// [`needs_frame`](Self::needs_frame) is true, and fires delayed work by
/// calling [`poll`](Self::poll) with the current time.
///
/// ```text
///   Closed --activate--> Opening --fade in done--> Opened
///     ^                     |                        |
///     |                   close                    close
///     |                     v                        |
///     +--fade out done-- Closing <-------------------+
/// ```
#[derive(Clone, Debug)]
pub struct Gallery {
    items: Vec<Item>,
    config: GalleryConfig,
    carousel: CarouselState,
    layout: LayoutEngine,
    state: TransitionState,
    fade: Fade<FadeDone>,
    overlay_opacity: f64,
    /// Source boxes captured from the surface, one per item
    boxes: Vec<Rect>,
    viewport: Size,
    resize: Throttle<Size>,
    summary_swap: Option<SummarySwap>,
}

impl Gallery {
    /// Build a gallery over `items`.
    ///
    /// Fails when `items` is empty or a fade step is not a positive number.
    pub fn new(items: Vec<Item>, config: GalleryConfig) -> Result<Self, GalleryError> {
        if items.is_empty() {
            return Err(GalleryError::Empty);
        }
        for step in [config.fade_in_step, config.fade_out_step] {
            if !(step.is_finite() && step > 0.0) {
                return Err(GalleryError::InvalidFadeStep(step));
            }
        }

        let count = items.len();
        log::debug!("gallery created with {} items", count);

        Ok(Self {
            carousel: CarouselState::new(count, config.showing_count),
            layout: LayoutEngine::new(config.min_viewport()),
            fade: Fade::new(config.fade_in_step, config.fade_out_step),
            resize: Throttle::new(config.resize_throttle_ms),
            boxes: vec![Rect::default(); count],
            items,
            config,
            state: TransitionState::Closed,
            overlay_opacity: 0.0,
            viewport: Size::default(),
            summary_swap: None,
        })
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    #[inline]
    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    #[inline]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.carousel.current()
    }

    /// Overlay opacity as last applied by a fade.
    #[inline]
    pub fn overlay_opacity(&self) -> f64 {
        self.overlay_opacity
    }

    /// Viewport size the layout is based on.
    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Source box captured for `index` at activation or on the last resize.
    pub fn captured_rect(&self, index: usize) -> Option<Rect> {
        self.boxes.get(index).copied()
    }

    pub fn nav_state(&self) -> NavState {
        NavState {
            prev_disabled: self.carousel.is_first(),
            next_disabled: self.carousel.is_last(),
        }
    }

    pub fn counter_text(&self) -> String {
        self.carousel.counter_text()
    }

    /// Whether the host should keep calling [`on_frame`](Self::on_frame).
    #[inline]
    pub fn needs_frame(&self) -> bool {
        self.fade.is_running()
    }

    /// Earliest time [`poll`](Self::poll) has work to do, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        let summary = self.summary_swap.map(|swap| swap.due_ms);
        match (self.resize.deadline(), summary) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Milliseconds from `now_ms` until [`next_deadline`](Self::next_deadline),
    /// never negative.
    pub fn time_until_deadline(&self, now_ms: f64) -> Option<f64> {
        self.next_deadline().map(|deadline| (deadline - now_ms).max(0.0))
    }

    /// Open the overlay on `index`.
    ///
    /// Ignored while the overlay is not closed, or when `index` is out of
    /// range.
    pub fn activate<S: Surface + ?Sized>(&mut self, index: usize, surface: &mut S) {
        if self.state != TransitionState::Closed {
            log::trace!("activate({}) ignored while {:?}", index, self.state);
            return;
        }
        if !self.carousel.set_current(index) {
            log::trace!("activate({}) ignored: out of range", index);
            return;
        }

        log::debug!("gallery opening at {}", index);
        self.set_state(TransitionState::Opening, surface);
        self.viewport = surface.viewport();
        self.overlay_opacity = self.overlay_opacity.clamp(0.0, 1.0);
        self.fade.start(FadeDirection::In, self.overlay_opacity, FadeDone::Open);

        self.capture_sizes(surface);
        self.apply_origins(surface);
    }

    /// Show the next item. Clamped at the last one.
    pub fn next<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
        self.navigate(now_ms, surface, CarouselState::next);
    }

    /// Show the previous item. Clamped at the first one.
    pub fn prev<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
        self.navigate(now_ms, surface, CarouselState::prev);
    }

    /// Show the item at `index`.
    pub fn go_to<S: Surface + ?Sized>(&mut self, index: usize, now_ms: f64, surface: &mut S) {
        self.navigate(now_ms, surface, |carousel| {
            carousel.current() != index && carousel.set_current(index)
        });
    }

    fn navigate<S, F>(&mut self, now_ms: f64, surface: &mut S, step: F)
    where
        S: Surface + ?Sized,
        F: FnOnce(&mut CarouselState) -> bool,
    {
        if self.state != TransitionState::Opened {
            log::trace!("navigation ignored while {:?}", self.state);
            return;
        }
        if !step(&mut self.carousel) {
            return;
        }
        log::debug!("switched to {}", self.carousel.current());
        self.switch_changes(Some(now_ms), surface);
    }

    /// Close the overlay.
    ///
    /// Every item returns to its on-page position at full opacity and the
    /// overlay fades out. Closing during the fade-in cancels it first.
    pub fn close<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        match self.state {
            TransitionState::Opened => {}
            TransitionState::Opening => {
                if let Some(opacity) = self.fade.cancel() {
                    self.overlay_opacity = opacity;
                }
                log::debug!("fade-in cancelled by close");
            }
            TransitionState::Closed | TransitionState::Closing => {
                log::trace!("close ignored while {:?}", self.state);
                return;
            }
        }

        log::debug!("gallery closing");
        self.apply_origins(surface);
        surface.apply_chrome(&ChromeLayout::collapsed());
        self.set_state(TransitionState::Closing, surface);
        self.overlay_opacity = self.overlay_opacity.clamp(0.0, 1.0);
        self.fade.start(FadeDirection::Out, self.overlay_opacity, FadeDone::Close);
    }

    /// React to a key release. Escape closes the overlay.
    pub fn handle_key<S: Surface + ?Sized>(&mut self, key: &str, key_code: u32, surface: &mut S) {
        if is_close_key(key, key_code) {
            self.close(surface);
        }
    }

    /// Record a viewport resize.
    ///
    /// Resizes are throttled; the layout is refreshed from
    /// [`poll`](Self::poll) once the window elapses, using the latest size.
    pub fn resize(&mut self, now_ms: f64, viewport: Size) {
        self.resize.call(now_ms, viewport);
    }

    /// Advance the overlay fade by one animation frame.
    pub fn on_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        match self.fade.tick() {
            FadeTick::Idle => {}
            FadeTick::Running(opacity) => {
                self.overlay_opacity = opacity;
                surface.set_overlay_opacity(opacity);
            }
            FadeTick::Finished(opacity, done) => {
                self.overlay_opacity = opacity;
                surface.set_overlay_opacity(opacity);
                match done {
                    FadeDone::Open => {
                        log::debug!("gallery opened");
                        self.set_state(TransitionState::Opened, surface);
                        self.switch_changes(None, surface);
                    }
                    FadeDone::Close => {
                        log::debug!("gallery closed");
                        self.set_state(TransitionState::Closed, surface);
                    }
                }
            }
        }
    }

    /// Run delayed work that is due at `now_ms`.
    pub fn poll<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
        if let Some(viewport) = self.resize.poll(now_ms) {
            self.viewport = viewport;
            if self.state == TransitionState::Opened {
                log::debug!("relayout for {}x{}", viewport.width, viewport.height);
                self.capture_sizes(surface);
                self.apply_layout(surface);
            }
        }

        if let Some(swap) = self.summary_swap {
            if now_ms >= swap.due_ms {
                self.summary_swap = None;
                self.show_summary(swap.index, surface);
            }
        }
    }

    fn set_state<S: Surface + ?Sized>(&mut self, state: TransitionState, surface: &mut S) {
        self.state = state;
        surface.set_overlay_state(state);
    }

    fn capture_sizes<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for (index, rect) in self.boxes.iter_mut().enumerate() {
            *rect = surface.source_rect(index);
            surface.set_item_size(index, rect.size());
        }
    }

    fn apply_origins<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for (index, rect) in self.boxes.iter_mut().enumerate() {
            *rect = surface.source_rect(index);
            surface.apply_item(index, &VisualParams::origin(*rect));
        }
    }

    fn apply_layout<S: Surface + ?Sized>(&self, surface: &mut S) {
        let image = self.boxes[self.carousel.current()].size();
        let layout = self.layout.compute(&self.carousel.partition(), self.viewport, image);
        for placement in &layout.placements {
            surface.apply_item(placement.index, &placement.params);
        }
        surface.apply_chrome(&layout.chrome);
    }

    /// Refresh everything that depends on the current index.
    ///
    /// With `now_ms` the summary crossfades; without it the text is swapped
    /// in place.
    fn switch_changes<S: Surface + ?Sized>(&mut self, now_ms: Option<f64>, surface: &mut S) {
        self.apply_layout(surface);
        surface.set_nav(self.nav_state());
        surface.set_counter(&self.counter_text());

        let index = self.carousel.current();
        match now_ms {
            Some(now_ms) => {
                surface.set_summary_opacity(0.0);
                self.summary_swap = Some(SummarySwap {
                    due_ms: now_ms + self.config.summary_delay_ms,
                    index,
                });
            }
            None => {
                self.summary_swap = None;
                self.show_summary(index, surface);
            }
        }
    }

    fn show_summary<S: Surface + ?Sized>(&self, index: usize, surface: &mut S) {
        if let Some(item) = self.items.get(index) {
            surface.set_summary_text(&item.title, &item.description);
            surface.set_summary_opacity(1.0);
        }
    }
}

/// Whether a key event should close the overlay.
pub fn is_close_key(key: &str, key_code: u32) -> bool {
    key == "Escape" || key == "Esc" || key_code == 27
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that records the last value applied to each target.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        viewport: Size,
        rects: Vec<Rect>,
        sizes: Vec<Option<Size>>,
        params: Vec<Option<VisualParams>>,
        overlay_state: TransitionState,
        overlay_opacity: f64,
        nav: NavState,
        counter: String,
        title: String,
        description: String,
        summary_opacity: f64,
        chrome: Option<ChromeLayout>,
        layout_passes: usize,
    }

    impl RecordingSurface {
        fn grid(count: usize) -> Self {
            let rects = (0..count)
                .map(|i| Rect::new(40.0 + (i % 4) as f64 * 320.0, 100.0 + (i / 4) as f64 * 220.0, 300.0, 200.0))
                .collect();
            Self {
                viewport: Size::new(1280.0, 800.0),
                rects,
                sizes: vec![None; count],
                params: vec![None; count],
                summary_opacity: 1.0,
                ..Self::default()
            }
        }
    }

    impl Surface for RecordingSurface {
        fn viewport(&self) -> Size {
            self.viewport
        }

        fn source_rect(&self, index: usize) -> Rect {
            self.rects[index]
        }

        fn set_item_size(&mut self, index: usize, size: Size) {
            self.sizes[index] = Some(size);
        }

        fn apply_item(&mut self, index: usize, params: &VisualParams) {
            self.params[index] = Some(*params);
        }

        fn set_overlay_state(&mut self, state: TransitionState) {
            self.overlay_state = state;
        }

        fn set_overlay_opacity(&mut self, opacity: f64) {
            self.overlay_opacity = opacity;
        }

        fn set_nav(&mut self, nav: NavState) {
            self.nav = nav;
        }

        fn set_counter(&mut self, text: &str) {
            self.counter = text.to_string();
        }

        fn set_summary_text(&mut self, title: &str, description: &str) {
            self.title = title.to_string();
            self.description = description.to_string();
        }

        fn set_summary_opacity(&mut self, opacity: f64) {
            self.summary_opacity = opacity;
        }

        fn apply_chrome(&mut self, chrome: &ChromeLayout) {
            if chrome.controls_height.is_some() {
                self.layout_passes += 1;
            }
            self.chrome = Some(*chrome);
        }
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item::new(format!("img/{i}.jpg"), format!("Title {i}"), format!("Description {i}")))
            .collect()
    }

    fn gallery(count: usize) -> (Gallery, RecordingSurface) {
        let gallery = Gallery::new(items(count), GalleryConfig::default()).unwrap();
        (gallery, RecordingSurface::grid(count))
    }

    /// Drive frames until the fade stops, returning how many were needed.
    fn run_frames(gallery: &mut Gallery, surface: &mut RecordingSurface) -> usize {
        let mut frames = 0;
        while gallery.needs_frame() {
            gallery.on_frame(surface);
            frames += 1;
            assert!(frames < 1000, "fade never finished");
        }
        frames
    }

    fn open(gallery: &mut Gallery, surface: &mut RecordingSurface, index: usize) {
        gallery.activate(index, surface);
        run_frames(gallery, surface);
        assert_eq!(gallery.state(), TransitionState::Opened);
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = Gallery::new(Vec::new(), GalleryConfig::default()).unwrap_err();
        assert_eq!(err, GalleryError::Empty);
    }

    #[test]
    fn test_new_rejects_bad_fade_step() {
        let config = GalleryConfig {
            fade_out_step: 0.0,
            ..GalleryConfig::default()
        };
        let err = Gallery::new(items(3), config).unwrap_err();
        assert_eq!(err, GalleryError::InvalidFadeStep(0.0));
    }

    #[test]
    fn test_activate_first_of_ten() {
        let (mut gallery, mut surface) = gallery(10);

        gallery.activate(0, &mut surface);
        assert_eq!(gallery.state(), TransitionState::Opening);
        assert_eq!(surface.overlay_state, TransitionState::Opening);
        assert_eq!(surface.sizes[3], Some(Size::new(300.0, 200.0)));
        assert_eq!(surface.params[5], Some(VisualParams::origin(surface.rects[5])));

        assert_eq!(run_frames(&mut gallery, &mut surface), 13);
        assert_eq!(gallery.state(), TransitionState::Opened);
        assert_eq!(surface.overlay_state, TransitionState::Opened);

        assert!(surface.nav.prev_disabled);
        assert!(!surface.nav.next_disabled);
        assert_eq!(surface.counter, "1/10");
        assert_eq!(surface.title, "Title 0");
        assert_eq!(surface.description, "Description 0");
        assert_eq!(surface.summary_opacity, 1.0);
        assert_eq!(surface.params[0].unwrap().z_index, 5);
        assert_eq!(surface.chrome.unwrap().summary_width_pct, 45.0);
    }

    #[test]
    fn test_next_to_the_end() {
        let (mut gallery, mut surface) = gallery(10);
        open(&mut gallery, &mut surface, 0);

        for step in 0..9 {
            gallery.next(step as f64 * 500.0, &mut surface);
        }
        assert_eq!(gallery.current_index(), 9);
        assert!(surface.nav.next_disabled);
        assert!(!surface.nav.prev_disabled);
        assert_eq!(surface.counter, "10/10");

        let passes = surface.layout_passes;
        gallery.next(10_000.0, &mut surface);
        assert_eq!(gallery.current_index(), 9);
        assert_eq!(surface.layout_passes, passes);
    }

    #[test]
    fn test_prev_at_start_is_noop() {
        let (mut gallery, mut surface) = gallery(4);
        open(&mut gallery, &mut surface, 0);

        gallery.prev(0.0, &mut surface);
        assert_eq!(gallery.current_index(), 0);
        assert_eq!(surface.summary_opacity, 1.0);
    }

    #[test]
    fn test_activate_ignored_unless_closed() {
        let (mut gallery, mut surface) = gallery(5);

        gallery.activate(9, &mut surface);
        assert_eq!(gallery.state(), TransitionState::Closed);

        gallery.activate(2, &mut surface);
        gallery.activate(4, &mut surface);
        assert_eq!(gallery.current_index(), 2);

        run_frames(&mut gallery, &mut surface);
        gallery.activate(4, &mut surface);
        assert_eq!(gallery.current_index(), 2);
        assert_eq!(gallery.state(), TransitionState::Opened);
    }

    #[test]
    fn test_navigation_ignored_while_opening() {
        let (mut gallery, mut surface) = gallery(5);
        gallery.activate(1, &mut surface);
        gallery.next(0.0, &mut surface);
        gallery.go_to(3, 0.0, &mut surface);
        assert_eq!(gallery.current_index(), 1);
    }

    #[test]
    fn test_summary_crossfade() {
        let (mut gallery, mut surface) = gallery(5);
        open(&mut gallery, &mut surface, 0);

        gallery.next(1000.0, &mut surface);
        assert_eq!(surface.summary_opacity, 0.0);
        assert_eq!(surface.title, "Title 0");
        assert_eq!(surface.counter, "2/5");
        assert_eq!(gallery.next_deadline(), Some(1300.0));

        gallery.poll(1299.0, &mut surface);
        assert_eq!(surface.title, "Title 0");

        gallery.poll(1300.0, &mut surface);
        assert_eq!(surface.title, "Title 1");
        assert_eq!(surface.summary_opacity, 1.0);
        assert_eq!(gallery.next_deadline(), None);
    }

    #[test]
    fn test_pending_deadlines_need_no_frames() {
        let (mut gallery, mut surface) = gallery(10);
        open(&mut gallery, &mut surface, 0);
        assert_eq!(gallery.next_deadline(), None);

        gallery.next(1000.0, &mut surface);
        surface.viewport = Size::new(1400.0, 900.0);
        gallery.resize(1100.0, surface.viewport);

        assert!(!gallery.needs_frame());
        assert_eq!(gallery.next_deadline(), Some(1300.0));
        assert_eq!(gallery.time_until_deadline(1100.0), Some(200.0));
        assert_eq!(gallery.time_until_deadline(1500.0), Some(0.0));

        gallery.poll(1300.0, &mut surface);
        assert_eq!(surface.summary_opacity, 1.0);
        assert_eq!(gallery.next_deadline(), Some(1350.0));

        gallery.poll(1350.0, &mut surface);
        assert_eq!(gallery.next_deadline(), None);
        assert_eq!(gallery.time_until_deadline(2000.0), None);
    }

    #[test]
    fn test_go_to_explicit_index() {
        let (mut gallery, mut surface) = gallery(8);
        open(&mut gallery, &mut surface, 0);

        gallery.go_to(6, 0.0, &mut surface);
        assert_eq!(gallery.current_index(), 6);
        assert_eq!(surface.counter, "7/8");

        let passes = surface.layout_passes;
        gallery.go_to(6, 10.0, &mut surface);
        gallery.go_to(8, 10.0, &mut surface);
        assert_eq!(surface.layout_passes, passes);
    }

    #[test]
    fn test_throttled_resize_relayouts_once() {
        let (mut gallery, mut surface) = gallery(10);
        open(&mut gallery, &mut surface, 0);
        let passes = surface.layout_passes;

        for (i, t) in [0.0, 25.0, 50.0, 75.0, 100.0].into_iter().enumerate() {
            gallery.resize(t, Size::new(1400.0 + i as f64 * 100.0, 900.0));
            gallery.poll(t, &mut surface);
        }
        assert_eq!(surface.layout_passes, passes);

        gallery.poll(250.0, &mut surface);
        gallery.poll(400.0, &mut surface);
        assert_eq!(surface.layout_passes, passes + 1);

        let active = surface.params[0].unwrap();
        assert_eq!(active.x, (1800.0 - 300.0) / 2.0);
        assert_eq!(active.y, (900.0 - 200.0) / 2.0);
    }

    #[test]
    fn test_resize_while_closed_does_not_layout() {
        let (mut gallery, mut surface) = gallery(3);
        gallery.resize(0.0, Size::new(2000.0, 1000.0));
        gallery.poll(500.0, &mut surface);
        assert_eq!(surface.layout_passes, 0);
        assert!(surface.params.iter().all(Option::is_none));
    }

    #[test]
    fn test_close_restores_origins() {
        let (mut gallery, mut surface) = gallery(10);
        open(&mut gallery, &mut surface, 0);
        gallery.next(0.0, &mut surface);
        gallery.next(10.0, &mut surface);

        gallery.close(&mut surface);
        assert_eq!(gallery.state(), TransitionState::Closing);
        for (index, rect) in surface.rects.iter().enumerate() {
            let params = surface.params[index].unwrap();
            assert_eq!(params, VisualParams::origin(*rect));
            assert_eq!(params.opacity, 1.0);
        }
        assert_eq!(surface.chrome, Some(ChromeLayout::collapsed()));

        gallery.activate(3, &mut surface);
        assert_eq!(gallery.state(), TransitionState::Closing);

        assert_eq!(run_frames(&mut gallery, &mut surface), 34);
        assert_eq!(gallery.state(), TransitionState::Closed);
        assert_eq!(surface.overlay_state, TransitionState::Closed);
    }

    #[test]
    fn test_close_during_fade_in_cancels_it() {
        let (mut gallery, mut surface) = gallery(6);
        gallery.activate(2, &mut surface);
        for _ in 0..3 {
            gallery.on_frame(&mut surface);
        }

        gallery.close(&mut surface);
        assert_eq!(gallery.state(), TransitionState::Closing);
        run_frames(&mut gallery, &mut surface);

        assert_eq!(gallery.state(), TransitionState::Closed);
        assert_eq!(surface.layout_passes, 0);
        assert!(gallery.overlay_opacity() <= 0.0);
    }

    #[test]
    fn test_reopen_fades_in_from_zero() {
        let (mut gallery, mut surface) = gallery(4);
        open(&mut gallery, &mut surface, 1);
        gallery.close(&mut surface);
        run_frames(&mut gallery, &mut surface);

        gallery.activate(3, &mut surface);
        assert_eq!(run_frames(&mut gallery, &mut surface), 13);
        assert_eq!(surface.counter, "4/4");
        assert_eq!(surface.title, "Title 3");
    }

    #[test]
    fn test_escape_closes() {
        let (mut gallery, mut surface) = gallery(3);
        open(&mut gallery, &mut surface, 0);

        gallery.handle_key("Enter", 13, &mut surface);
        assert_eq!(gallery.state(), TransitionState::Opened);

        gallery.handle_key("Escape", 27, &mut surface);
        assert_eq!(gallery.state(), TransitionState::Closing);
    }

    #[test]
    fn test_close_keys() {
        assert!(is_close_key("Escape", 0));
        assert!(is_close_key("Esc", 0));
        assert!(is_close_key("", 27));
        assert!(!is_close_key("q", 81));
    }

    #[test]
    fn test_two_item_gallery() {
        let (mut gallery, mut surface) = gallery(2);
        open(&mut gallery, &mut surface, 1);

        let engine = LayoutEngine::default();
        let expected = engine
            .slot_params(crate::Bucket::NearPrevious, 0, surface.viewport, Size::new(300.0, 200.0))
            .unwrap();
        assert_eq!(surface.params[0], Some(expected));
        assert_eq!(surface.params[1].unwrap().z_index, 5);
        assert!(!surface.nav.prev_disabled);
        assert!(surface.nav.next_disabled);
    }

    #[test]
    fn test_unbounded_showing_count_lays_out_near_ranks() {
        let config = GalleryConfig {
            showing_count: usize::MAX,
            ..GalleryConfig::default()
        };
        let mut gallery = Gallery::new(items(3), config).unwrap();
        let mut surface = RecordingSurface::grid(3);
        open(&mut gallery, &mut surface, 1);

        let engine = LayoutEngine::default();
        let size = Size::new(300.0, 200.0);
        let near_next = engine.slot_params(crate::Bucket::NearNext, 0, surface.viewport, size);
        assert_eq!(surface.params[2], near_next);
        gallery.next(0.0, &mut surface);
        assert_eq!(gallery.current_index(), 2);
    }

    #[test]
    fn test_single_item_disables_both_navs() {
        let (mut gallery, mut surface) = gallery(1);
        open(&mut gallery, &mut surface, 0);
        assert_eq!(gallery.nav_state(), NavState { prev_disabled: true, next_disabled: true });
        assert_eq!(surface.counter, "1/1");
    }
}
