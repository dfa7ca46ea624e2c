//! Gallery configuration.

/// Identifiers the rendering surface uses for the overlay structure.
///
/// The DOM backend turns these into CSS class names; other backends are free
/// to ignore them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceClasses {
    pub modal: String,
    pub opened: String,
    pub opening: String,
    pub summary: String,
    pub summary_content: String,
    pub title: String,
    pub description: String,
    pub controls: String,
    pub close: String,
    pub navs: String,
    pub nav: String,
    pub nav_prev: String,
    pub nav_next: String,
    pub counter: String,
    pub images: String,
    pub image: String,
}

impl Default for SurfaceClasses {
    fn default() -> Self {
        Self {
            modal: "modal".into(),
            opened: "modal_Opened".into(),
            opening: "modal_Opening".into(),
            summary: "modalSummary".into(),
            summary_content: "modalSummaryContent".into(),
            title: "modalTitle".into(),
            description: "modalDescription".into(),
            controls: "modalControls".into(),
            close: "modalClose".into(),
            navs: "modalNavs".into(),
            nav: "modalNav".into(),
            nav_prev: "modalNavPrev".into(),
            nav_next: "modalNavNext".into(),
            counter: "modalCounter".into(),
            images: "modalImages".into(),
            image: "modalImage".into(),
        }
    }
}

/// Construction-time gallery settings.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GalleryConfig {
    /// Selector matching the activatable links inside the container
    pub link_selector: String,
    /// Neighbours shown on each side of the active image
    pub showing_count: usize,
    /// Layout width floor in pixels
    pub min_width: f64,
    /// Layout height floor in pixels
    pub min_height: f64,
    /// Resize throttle window in milliseconds
    pub resize_throttle_ms: f64,
    /// Delay before the summary text is swapped during a crossfade
    pub summary_delay_ms: f64,
    /// Overlay opacity gained per frame while opening
    pub fade_in_step: f64,
    /// Overlay opacity lost per frame while closing
    pub fade_out_step: f64,
    pub classes: SurfaceClasses,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            link_selector: ".card".into(),
            showing_count: 4,
            min_width: 1023.0,
            min_height: 600.0,
            resize_throttle_ms: 250.0,
            summary_delay_ms: 300.0,
            fade_in_step: 0.08,
            fade_out_step: 0.03,
            classes: SurfaceClasses::default(),
        }
    }
}

impl GalleryConfig {
    /// Parse a TOML string into a `GalleryConfig`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Layout floors as a size.
    #[inline]
    pub fn min_viewport(&self) -> crate::Size {
        crate::Size::new(self.min_width, self.min_height)
    }
}
