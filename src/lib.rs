//! # gallery-stack-view
//!
//! Core layout and transition engine for perspective-stack image gallery
//! overlays.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Tracking the focused image and splitting the rest into five buckets
//!   around it (far-previous, near-previous, active, near-next, far-next)
//! - Computing position, opacity, stacking order and scale for every image
//!   from the viewport and image size
//! - Driving the open/switch/close sequence with frame-stepped fades, a
//!   delayed summary crossfade and throttled resizes
//! - Rendering to the DOM (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`GalleryConfig`] from TOML
//! - `web` - Enable the web/WASM DOM surface and event wiring
//!
//! ## Example
//!
//! ```rust,ignore
//! use gallery_stack_view::{Gallery, GalleryConfig, Item, Size};
//!
//! let items = vec![
//!     Item::new("img/dunes.jpg", "Dunes", "Sand at dusk"),
//!     Item::new("img/coast.jpg", "Coast", "Cliffs in fog"),
//! ];
//! let mut gallery = Gallery::new(items, GalleryConfig::default())?;
//!
//! // `surface` implements `gallery_stack_view::Surface`
//! gallery.activate(0, &mut surface);
//! while gallery.needs_frame() {
//!     gallery.on_frame(&mut surface); // once per animation frame
//! }
//!
//! gallery.next(now_ms, &mut surface);
//! gallery.poll(now_ms + 300.0, &mut surface); // summary text swaps in
//! ```

mod carousel;
mod config;
mod data;
mod fade;
mod gallery;
pub mod layout;
pub mod surface;
mod throttle;

pub use carousel::{Bucket, CarouselState, Partition};
pub use config::{GalleryConfig, SurfaceClasses};
pub use data::{Item, Rect, Size};
pub use fade::{Fade, FadeDirection, FadeTick};
pub use gallery::{is_close_key, Gallery, GalleryError, TransitionState};
pub use layout::{ChromeLayout, LayoutEngine, StackLayout, VisualParams};
pub use surface::{NavState, Surface};
pub use throttle::Throttle;

#[cfg(feature = "web")]
pub use surface::web::{mount, GalleryHandle};
