//! Layout calculations for the perspective stack.

use crate::{Bucket, Partition, Rect, Size};

/// Computed visual transform for one item in one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualParams {
    /// Horizontal offset in pixels
    pub x: f64,
    /// Vertical offset in pixels
    pub y: f64,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
    /// Stacking order, higher is in front
    pub z_index: i32,
    /// Scale factor
    pub scale: f64,
}

impl VisualParams {
    /// Params placing an item back at its on-page source position.
    pub fn origin(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            opacity: 1.0,
            z_index: 0,
            scale: 1.0,
        }
    }
}

/// A coordinate expressed as a linear combination of the layout dimensions.
///
/// Resolves to `w * W + h * H + iw * image_width + ih * image_height`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Offset {
    w: f64,
    h: f64,
    iw: f64,
    ih: f64,
}

impl Offset {
    const fn of_width(w: f64) -> Self {
        Self { w, h: 0.0, iw: 0.0, ih: 0.0 }
    }

    const fn of_height(h: f64) -> Self {
        Self { w: 0.0, h, iw: 0.0, ih: 0.0 }
    }

    const fn of_image_height(ih: f64) -> Self {
        Self { w: 0.0, h: 0.0, iw: 0.0, ih }
    }

    #[inline]
    fn resolve(&self, viewport: Size, image: Size) -> f64 {
        self.w * viewport.width + self.h * viewport.height + self.iw * image.width + self.ih * image.height
    }
}

/// Fixed visual treatment for one bucket slot.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Slot {
    left: Offset,
    top: Offset,
    opacity: f64,
    z_index: i32,
    scale: f64,
}

impl Slot {
    fn resolve(&self, viewport: Size, image: Size) -> VisualParams {
        VisualParams {
            x: self.left.resolve(viewport, image),
            y: self.top.resolve(viewport, image),
            opacity: self.opacity,
            z_index: self.z_index,
            scale: self.scale,
        }
    }
}

const FAR_PREVIOUS: Slot = Slot {
    left: Offset::of_width(0.29),
    top: Offset::of_height(-1.0),
    opacity: 0.1,
    z_index: 1,
    scale: 0.4,
};

const NEAR_PREVIOUS: [Slot; 4] = [
    Slot {
        left: Offset::of_width(0.25),
        top: Offset { w: 0.0, h: 1.0, iw: 0.0, ih: -1.0 },
        opacity: 0.4,
        z_index: 4,
        scale: 0.75,
    },
    Slot {
        left: Offset::of_width(0.06),
        top: Offset::of_height(0.35),
        opacity: 0.3,
        z_index: 3,
        scale: 0.6,
    },
    Slot {
        left: Offset::of_width(0.15),
        top: Offset::of_height(0.0),
        opacity: 0.2,
        z_index: 2,
        scale: 0.5,
    },
    Slot {
        left: Offset::of_width(0.29),
        top: Offset::of_image_height(-0.3),
        opacity: 0.1,
        z_index: 1,
        scale: 0.4,
    },
];

const ACTIVE: Slot = Slot {
    left: Offset { w: 0.5, h: 0.0, iw: -0.5, ih: 0.0 },
    top: Offset { w: 0.0, h: 0.5, iw: 0.0, ih: -0.5 },
    opacity: 1.0,
    z_index: 5,
    scale: 1.2,
};

const NEAR_NEXT: [Slot; 4] = [
    Slot {
        left: Offset::of_width(0.52),
        top: Offset::of_height(0.0),
        opacity: 0.4,
        z_index: 4,
        scale: 0.75,
    },
    Slot {
        left: Offset::of_width(0.73),
        top: Offset::of_height(0.12),
        opacity: 0.3,
        z_index: 3,
        scale: 0.6,
    },
    Slot {
        left: Offset::of_width(0.67),
        top: Offset::of_height(0.46),
        opacity: 0.2,
        z_index: 2,
        scale: 0.5,
    },
    Slot {
        left: Offset::of_width(0.53),
        top: Offset::of_height(0.67),
        opacity: 0.1,
        z_index: 1,
        scale: 0.4,
    },
];

const FAR_NEXT: Slot = Slot {
    left: Offset::of_width(0.53),
    top: Offset::of_height(1.0),
    opacity: 0.1,
    z_index: 1,
    scale: 0.4,
};

/// Active image scale, also used to size the controls panel.
const ACTIVE_SCALE: f64 = ACTIVE.scale;

/// Summary panel width (percent of the overlay) while open.
pub const SUMMARY_OPEN_WIDTH_PCT: f64 = 45.0;

/// Controls top margin that pushes the panel out of view while closed.
pub const CONTROLS_HIDDEN_MARGIN: f64 = 3000.0;

/// Placement of the overlay chrome (summary and controls panels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChromeLayout {
    /// Summary panel width as a percentage of the overlay
    pub summary_width_pct: f64,
    /// Controls panel top margin in pixels
    pub controls_margin_top: f64,
    /// Controls panel height in pixels, `None` leaves it unchanged
    pub controls_height: Option<f64>,
}

impl ChromeLayout {
    /// Chrome collapsed out of view, used while closing.
    pub fn collapsed() -> Self {
        Self {
            summary_width_pct: 0.0,
            controls_margin_top: CONTROLS_HIDDEN_MARGIN,
            controls_height: None,
        }
    }
}

/// One item's params for a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub params: VisualParams,
}

/// Result of a layout pass.
///
/// Items that fall outside the slot table have no placement and keep
/// whatever they were showing.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLayout {
    pub placements: Vec<Placement>,
    pub chrome: ChromeLayout,
}

impl StackLayout {
    /// Look up the params assigned to `index`, if any.
    pub fn params_for(&self, index: usize) -> Option<&VisualParams> {
        self.placements.iter().find(|p| p.index == index).map(|p| &p.params)
    }
}

/// Maps a bucket partition to per-item visual params.
///
/// ## Example
///
/// ```rust
/// use gallery_stack_view::{CarouselState, LayoutEngine, Size};
///
/// let engine = LayoutEngine::default();
/// let mut carousel = CarouselState::new(10, 4);
/// carousel.set_current(5);
///
/// let layout = engine.compute(&carousel.partition(), Size::new(1280.0, 800.0), Size::new(300.0, 200.0));
/// let active = layout.params_for(5).unwrap();
/// assert_eq!(active.z_index, 5);
/// assert_eq!(active.x, (1280.0 - 300.0) / 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    /// Floor applied to the viewport before layout
    pub min_viewport: Size,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            min_viewport: Size::new(1023.0, 600.0),
        }
    }
}

impl LayoutEngine {
    /// Create an engine with the given viewport floor.
    pub fn new(min_viewport: Size) -> Self {
        Self { min_viewport }
    }

    /// The viewport actually used for layout.
    #[inline]
    pub fn clamp_viewport(&self, viewport: Size) -> Size {
        viewport.at_least(self.min_viewport)
    }

    /// Params for a single bucket slot, or `None` when the rank has no slot.
    pub fn slot_params(&self, bucket: Bucket, rank: usize, viewport: Size, image: Size) -> Option<VisualParams> {
        let viewport = self.clamp_viewport(viewport);
        let slot = match bucket {
            Bucket::FarPrevious => Some(&FAR_PREVIOUS),
            Bucket::NearPrevious => NEAR_PREVIOUS.get(rank),
            Bucket::Active => Some(&ACTIVE),
            Bucket::NearNext => NEAR_NEXT.get(rank),
            Bucket::FarNext => Some(&FAR_NEXT),
        }?;
        Some(slot.resolve(viewport, image))
    }

    /// Chrome placement while the gallery is open.
    pub fn chrome(&self, viewport: Size, image: Size) -> ChromeLayout {
        let viewport = self.clamp_viewport(viewport);
        let controls_height = image.height * ACTIVE_SCALE;
        ChromeLayout {
            summary_width_pct: SUMMARY_OPEN_WIDTH_PCT,
            controls_margin_top: (viewport.height - controls_height) / 2.0,
            controls_height: Some(controls_height),
        }
    }

    /// Compute params for every placed item.
    ///
    /// `image` is the captured size of the active item.
    pub fn compute(&self, partition: &Partition, viewport: Size, image: Size) -> StackLayout {
        let mut placements = Vec::with_capacity(partition.total());
        let mut place = |bucket: Bucket, rank: usize, index: usize| {
            if let Some(params) = self.slot_params(bucket, rank, viewport, image) {
                placements.push(Placement { index, params });
            }
        };

        for &index in &partition.far_previous {
            place(Bucket::FarPrevious, 0, index);
        }
        for (rank, &index) in partition.near_previous.iter().enumerate() {
            place(Bucket::NearPrevious, rank, index);
        }
        place(Bucket::Active, 0, partition.active);
        for (rank, &index) in partition.near_next.iter().enumerate() {
            place(Bucket::NearNext, rank, index);
        }
        for &index in &partition.far_next {
            place(Bucket::FarNext, 0, index);
        }

        StackLayout {
            placements,
            chrome: self.chrome(viewport, image),
        }
    }
}
