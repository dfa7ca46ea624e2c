//! Core data structures for gallery items and geometry.

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Raise each dimension to at least the matching floor.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use gallery_stack_view::Size;
    ///
    /// let clamped = Size::new(800.0, 900.0).at_least(Size::new(1023.0, 600.0));
    /// assert_eq!(clamped, Size::new(1023.0, 900.0));
    /// ```
    #[inline]
    pub fn at_least(self, floor: Size) -> Size {
        Size {
            width: self.width.max(floor.width),
            height: self.height.max(floor.height),
        }
    }
}

/// An on-screen box, as reported by the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge in pixels
    pub x: f64,
    /// Top edge in pixels
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The width/height of this rect.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// One navigable image entry.
///
/// Items are built once from the gallery's source links and never change
/// afterwards. On-screen geometry lives with the gallery, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Image location (the link's `href`)
    pub src: String,
    pub title: String,
    pub description: String,
}

impl Item {
    /// Create a new item.
    pub fn new(src: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}
