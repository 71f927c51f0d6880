//! Configuration options for points and batches.
//!
//! The size thresholds live in [`PointOptions`], which is carried by every
//! [`Point`](crate::Point) and [`Batch`](crate::Batch). Two points built with
//! different options never see each other's limits.
//!
//! ## Examples
//!
//! ```rust
//! use pandora_points::{Point, PointOptions};
//!
//! let options = PointOptions::new().with_max_point_size(16);
//! let mut point = Point::with_options(options);
//! point.append("message", "a fairly long line");
//! assert!(point.is_too_large());
//!
//! // Default options are unaffected
//! let mut other = Point::new();
//! other.append("message", "a fairly long line");
//! assert!(!other.is_too_large());
//! ```

/// Default per-point threshold: 1 MiB of serialized text.
pub const DEFAULT_MAX_POINT_SIZE: usize = 1024 * 1024;

/// Default per-batch threshold: 2 MiB of serialized text.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 2 * 1024 * 1024;

/// Size thresholds for points and batches.
///
/// # Examples
///
/// ```rust
/// use pandora_points::{PointOptions, DEFAULT_MAX_POINT_SIZE};
///
/// let options = PointOptions::new();
/// assert_eq!(options.max_point_size, DEFAULT_MAX_POINT_SIZE);
///
/// let options = PointOptions::new()
///     .with_max_point_size(4096)
///     .with_max_batch_size(64 * 1024);
/// assert_eq!(options.max_batch_size, 64 * 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointOptions {
    /// A point whose byte size reaches this value is reported as too large.
    pub max_point_size: usize,
    /// A batch never grows past this many bytes.
    pub max_batch_size: usize,
}

impl Default for PointOptions {
    fn default() -> Self {
        PointOptions {
            max_point_size: DEFAULT_MAX_POINT_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl PointOptions {
    /// Creates default options (1 MiB per point, 2 MiB per batch).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-point threshold used by [`Point::is_too_large`](crate::Point::is_too_large).
    #[must_use]
    pub fn with_max_point_size(mut self, max_point_size: usize) -> Self {
        self.max_point_size = max_point_size;
        self
    }

    /// Sets the per-batch threshold used by [`Batch::push`](crate::Batch::push).
    #[must_use]
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}
