//! Size-bounded batches of points.
//!
//! Points are shipped to the ingestion endpoint as newline-joined records. A
//! [`Batch`] collects points while keeping the total text under
//! [`PointOptions::max_batch_size`].
//!
//! ## Examples
//!
//! ```rust
//! use pandora_points::{Batch, Point, PointOptions};
//!
//! let mut batch = Batch::with_options(PointOptions::new().with_max_batch_size(16));
//!
//! let mut first = Point::new();
//! first.append("a", 1);
//! batch.push(first).unwrap();
//!
//! let mut second = Point::new();
//! second.append("message", "too much");
//! assert!(!batch.fits(&second));
//! assert!(batch.push(second).is_err());
//!
//! assert_eq!(batch.to_string(), "a=1\n");
//! let shipped = batch.take();
//! assert_eq!(shipped.len(), 1);
//! assert!(batch.is_empty());
//! ```

use crate::{Error, Point, PointOptions, Result};
use std::fmt;
use std::io;
use tracing::debug;

/// An ordered group of points bounded by a total byte size.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    points: Vec<Point>,
    size: usize,
    options: PointOptions,
}

impl Batch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: PointOptions) -> Self {
        Batch {
            points: Vec::new(),
            size: 0,
            options,
        }
    }

    /// Returns `true` if `point` can be pushed without exceeding either limit.
    #[must_use]
    pub fn fits(&self, point: &Point) -> bool {
        point.byte_size() < self.options.max_point_size
            && self.size + point.byte_size() <= self.options.max_batch_size
    }

    /// Adds a point to the batch.
    ///
    /// # Errors
    ///
    /// - [`Error::PointTooLarge`] if the point is at or over `max_point_size`
    /// - [`Error::BatchFull`] if the batch would grow past `max_batch_size`
    ///
    /// The point is dropped in both cases; check [`fits`](Self::fits) first to keep it.
    pub fn push(&mut self, point: Point) -> Result<()> {
        let point_size = point.byte_size();
        if point_size >= self.options.max_point_size {
            debug!(
                size = point_size,
                limit = self.options.max_point_size,
                "rejecting oversized point"
            );
            return Err(Error::PointTooLarge {
                size: point_size,
                limit: self.options.max_point_size,
            });
        }
        let new_size = self.size + point_size;
        if new_size > self.options.max_batch_size {
            debug!(
                size = new_size,
                limit = self.options.max_batch_size,
                points = self.points.len(),
                "batch full"
            );
            return Err(Error::BatchFull {
                size: new_size,
                limit: self.options.max_batch_size,
            });
        }
        self.size = new_size;
        self.points.push(point);
        Ok(())
    }

    /// Removes and returns every point, leaving the batch empty.
    pub fn take(&mut self) -> Vec<Point> {
        self.size = 0;
        std::mem::take(&mut self.points)
    }

    /// Total size in bytes of the batch text.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn options(&self) -> &PointOptions {
        &self.options
    }

    /// Writes the batch text to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self).map_err(|e| Error::io(&e.to_string()))
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Each record already ends with its own newline.
        for point in &self.points {
            write!(f, "{}", point)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(key: &str, value: &str) -> Point {
        let mut p = Point::new();
        p.append(key, value);
        p
    }

    #[test]
    fn test_batch_text_joins_records() {
        let mut batch = Batch::new();
        batch.push(point("a", "1")).unwrap();
        batch.push(point("b", "2")).unwrap();
        assert_eq!(batch.to_string(), "a=1\nb=2\n");
        assert_eq!(batch.byte_size(), batch.to_string().len());
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_batch_limit_is_inclusive() {
        // each point is 4 bytes
        let mut batch = Batch::with_options(PointOptions::new().with_max_batch_size(8));
        batch.push(point("a", "1")).unwrap();
        batch.push(point("b", "2")).unwrap();
        let err = batch.push(point("c", "3")).unwrap_err();
        assert!(matches!(err, Error::BatchFull { size: 12, limit: 8 }));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_oversized_point_rejected_even_when_empty() {
        let options = PointOptions::new()
            .with_max_point_size(4)
            .with_max_batch_size(1024);
        let mut batch = Batch::with_options(options);
        let p = point("a", "1");
        assert!(!batch.fits(&p));
        assert!(matches!(
            batch.push(p),
            Err(Error::PointTooLarge { size: 4, limit: 4 })
        ));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_empty_point_adds_nothing() {
        let mut batch = Batch::new();
        batch.push(Point::new()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.byte_size(), 0);
        assert_eq!(batch.to_string(), "");
    }

    #[test]
    fn test_take_resets_size() {
        let mut batch = Batch::new();
        batch.push(point("a", "1")).unwrap();
        let points = batch.take();
        assert_eq!(points.len(), 1);
        assert_eq!(batch.byte_size(), 0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_write_to() {
        let mut batch = Batch::new();
        batch.push(point("a", "1")).unwrap();
        let mut out = Vec::new();
        batch.write_to(&mut out).unwrap();
        assert_eq!(out, b"a=1\n");
    }
}
