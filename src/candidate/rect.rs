//! Axis-aligned integer rectangles with half-open bounds.

/// Rectangle covering `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl Rect {
    /// Creates a rectangle from two corners, swapping coordinates if needed
    /// so that `x0 <= x1` and `y0 <= y1`.
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Extent along x, never negative.
    pub fn width(&self) -> i64 {
        (self.x1 - self.x0).max(0)
    }

    /// Extent along y, never negative.
    pub fn height(&self) -> i64 {
        (self.y1 - self.y0).max(0)
    }

    /// Number of unit cells covered.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Returns true if the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Intersection; an empty rectangle if the two do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if r.x0 >= r.x1 || r.y0 >= r.y1 {
            return Rect::default();
        }
        r
    }

    /// Fraction of `self` covered by `other`, in `[0, 1]`.
    ///
    /// Not symmetric: a small rectangle inside a large one is fully covered
    /// by it, while the large one is only partly covered by the small one.
    pub fn cover(&self, other: &Rect) -> f64 {
        let area = self.area();
        if area == 0 {
            return 0.0;
        }
        self.intersect(other).area() as f64 / area as f64
    }

    /// Intersection over union, in `[0, 1]`.
    pub fn iou(&self, other: &Rect) -> f64 {
        let inter = self.intersect(other).area();
        let union = self.area() + other.area() - inter;
        if union == 0 {
            return 0.0;
        }
        inter as f64 / union as f64
    }
}
