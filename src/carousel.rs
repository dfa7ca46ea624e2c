//! Carousel position and the five-bucket partition around it.

/// Index-relative grouping used to pick an item's visual treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// More than `showing_count` positions before the active item
    FarPrevious,
    /// Within `showing_count` positions before the active item
    NearPrevious,
    Active,
    /// Within `showing_count` positions after the active item
    NearNext,
    /// More than `showing_count` positions after the active item
    FarNext,
}

/// Item indices split into buckets around the current index.
///
/// Near buckets (and far-previous) are ordered closest first, so
/// `near_previous[0]` is the item right before the active one. Far-next is
/// in ascending index order, which is also closest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub far_previous: Vec<usize>,
    pub near_previous: Vec<usize>,
    pub active: usize,
    pub near_next: Vec<usize>,
    pub far_next: Vec<usize>,
}

impl Partition {
    /// Total number of indices across all buckets, the active one included.
    pub fn total(&self) -> usize {
        self.far_previous.len() + self.near_previous.len() + 1 + self.near_next.len() + self.far_next.len()
    }
}

/// Current position within a fixed-size gallery.
///
/// ## Example
///
/// ```rust
/// use gallery_stack_view::CarouselState;
///
/// let mut carousel = CarouselState::new(3, 4);
/// assert!(carousel.is_first());
/// assert!(!carousel.prev()); // clamped
///
/// carousel.next();
/// carousel.next();
/// assert!(carousel.is_last());
/// assert!(!carousel.next()); // clamped
/// assert_eq!(carousel.counter_text(), "3/3");
/// ```
#[derive(Clone, Debug)]
pub struct CarouselState {
    current: usize,
    count: usize,
    showing_count: usize,
}

impl CarouselState {
    /// Create a carousel over `count` items, positioned at the first one.
    pub fn new(count: usize, showing_count: usize) -> Self {
        Self {
            current: 0,
            count,
            showing_count,
        }
    }

    /// Get the current index.
    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Get the number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Neighbour window radius on each side.
    #[inline]
    pub fn showing_count(&self) -> usize {
        self.showing_count
    }

    /// Jump to `index`.
    ///
    /// Out-of-range indices are ignored. Returns `true` if the index was
    /// accepted.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.current = index;
        true
    }

    /// Move one item forward unless already at the last one.
    ///
    /// Returns `true` if the index moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move one item back unless already at the first one.
    ///
    /// Returns `true` if the index moved.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    #[inline]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.count
    }

    /// Position counter as shown to the user, 1-based.
    pub fn counter_text(&self) -> String {
        format!("{}/{}", self.current + 1, self.count)
    }

    /// Classify `index` relative to the current one.
    ///
    /// Returns the bucket and the rank within it (0 = closest to the active
    /// item), or `None` when `index` is out of range.
    pub fn bucket_of(&self, index: usize) -> Option<(Bucket, usize)> {
        if index >= self.count {
            return None;
        }
        let current = self.current;
        let showing = self.showing_count;

        // `showing` may be as large as `usize::MAX`
        let bucket = if index.saturating_add(showing) < current {
            (Bucket::FarPrevious, current - showing - 1 - index)
        } else if index < current {
            (Bucket::NearPrevious, current - 1 - index)
        } else if index == current {
            (Bucket::Active, 0)
        } else if index <= current.saturating_add(showing) {
            (Bucket::NearNext, index - current - 1)
        } else {
            (Bucket::FarNext, index - current - showing - 1)
        };
        Some(bucket)
    }

    /// Split every index into the five buckets around the current index.
    pub fn partition(&self) -> Partition {
        let mut partition = Partition {
            active: self.current,
            ..Partition::default()
        };

        for index in (0..self.count).rev() {
            match self.bucket_of(index) {
                Some((Bucket::FarPrevious, _)) => partition.far_previous.push(index),
                Some((Bucket::NearPrevious, _)) => partition.near_previous.push(index),
                _ => {}
            }
        }
        for index in self.current + 1..self.count {
            match self.bucket_of(index) {
                Some((Bucket::NearNext, _)) => partition.near_next.push(index),
                Some((Bucket::FarNext, _)) => partition.far_next.push(index),
                _ => {}
            }
        }

        partition
    }
}
