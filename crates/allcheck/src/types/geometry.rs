/*! Geometry types for screen coordinates (integer pixels). */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Axis-aligned rectangle in screen pixels.
///
/// Always normalized: `left <= right` and `top <= bottom`. The right and
/// bottom edges are exclusive, so a rect with `left == right` is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(from = "RectRepr")]
#[ts(export)]
pub struct Rect {
  left: i32,
  top: i32,
  right: i32,
  bottom: i32,
}

/// Unvalidated wire form. Normalized on the way in.
#[derive(Deserialize)]
struct RectRepr {
  left: i32,
  top: i32,
  right: i32,
  bottom: i32,
}

impl From<RectRepr> for Rect {
  fn from(r: RectRepr) -> Self {
    Self::new(r.left, r.top, r.right, r.bottom)
  }
}

impl Rect {
  /// Build a rect from edges, swapping them where needed.
  pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
    let (left, right) = if left <= right { (left, right) } else { (right, left) };
    let (top, bottom) = if top <= bottom { (top, bottom) } else { (bottom, top) };
    Self {
      left,
      top,
      right,
      bottom,
    }
  }

  /// Build a rect from an origin and a size.
  pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
    Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
  }

  pub const fn left(&self) -> i32 {
    self.left
  }

  pub const fn top(&self) -> i32 {
    self.top
  }

  pub const fn right(&self) -> i32 {
    self.right
  }

  pub const fn bottom(&self) -> i32 {
    self.bottom
  }

  pub const fn width(&self) -> i64 {
    self.right as i64 - self.left as i64
  }

  pub const fn height(&self) -> i64 {
    self.bottom as i64 - self.top as i64
  }

  pub const fn area(&self) -> i64 {
    self.width() * self.height()
  }

  pub const fn is_empty(&self) -> bool {
    self.left == self.right || self.top == self.bottom
  }

  /// Centre point, rounded towards the top-left.
  #[allow(clippy::cast_possible_truncation)] // Midpoint of two i32s fits in i32
  pub const fn center(&self) -> Point {
    Point::new(
      ((self.left as i64 + self.right as i64) / 2) as i32,
      ((self.top as i64 + self.bottom as i64) / 2) as i32,
    )
  }

  /// Check if a point lies inside (right/bottom edges exclusive).
  pub const fn contains_point(&self, p: Point) -> bool {
    p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
  }

  /// Check if `other` lies entirely within these bounds.
  pub const fn contains(&self, other: &Rect) -> bool {
    !self.is_empty()
      && self.left <= other.left
      && self.top <= other.top
      && self.right >= other.right
      && self.bottom >= other.bottom
  }

  /// Check if the two rects share a region of positive area.
  pub const fn intersects(&self, other: &Rect) -> bool {
    !self.is_empty()
      && !other.is_empty()
      && self.left < other.right
      && other.left < self.right
      && self.top < other.bottom
      && other.top < self.bottom
  }

  /// Overlapping region, if any.
  pub fn intersection(&self, other: &Rect) -> Option<Rect> {
    if !self.intersects(other) {
      return None;
    }
    Some(Rect::new(
      self.left.max(other.left),
      self.top.max(other.top),
      self.right.min(other.right),
      self.bottom.min(other.bottom),
    ))
  }

  /// Smallest rect covering both. Empty rects are ignored.
  pub fn union(&self, other: &Rect) -> Rect {
    if self.is_empty() {
      return *other;
    }
    if other.is_empty() {
      return *self;
    }
    Rect::new(
      self.left.min(other.left),
      self.top.min(other.top),
      self.right.max(other.right),
      self.bottom.max(other.bottom),
    )
  }

  /// Intersection-over-union score in `[0, 1]`. Zero when there is no overlap.
  #[allow(clippy::cast_precision_loss)] // Screen areas are far below 2^52
  pub fn iou(&self, other: &Rect) -> f64 {
    let Some(overlap) = self.intersection(other) else {
      return 0.0;
    };
    let inter = overlap.area();
    let union = self.area() + other.area() - inter;
    if union <= 0 {
      return 0.0;
    }
    inter as f64 / union as f64
  }
}

/// A 2D point in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Point {
  pub x: i32,
  pub y: i32,
}

impl Point {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  mod rect_new {
    use super::*;

    #[test]
    fn swapped_edges_are_normalized() {
      let r = Rect::new(100, 80, 10, 20);
      assert_eq!(r.left(), 10);
      assert_eq!(r.top(), 20);
      assert_eq!(r.right(), 100);
      assert_eq!(r.bottom(), 80);
    }

    #[test]
    fn deserialized_rect_is_normalized() {
      let r: Rect =
        serde_json::from_str(r#"{"left":50,"top":50,"right":0,"bottom":10}"#).unwrap_or_default();
      assert_eq!(r, Rect::new(0, 10, 50, 50));
    }

    #[test]
    fn from_size() {
      let r = Rect::from_size(10, 20, 30, 40);
      assert_eq!(r, Rect::new(10, 20, 40, 60));
      assert_eq!(r.width(), 30);
      assert_eq!(r.height(), 40);
      assert_eq!(r.area(), 1200);
    }
  }

  mod rect_relations {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
      let a = Rect::new(0, 0, 10, 10);
      let b = Rect::new(10, 0, 20, 10);
      assert!(!a.intersects(&b), "shared edge has zero area");
      assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn overlapping_rects_intersect() {
      let a = Rect::new(0, 0, 10, 10);
      let b = Rect::new(5, 5, 15, 15);
      assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 10, 10)));
    }

    #[test]
    fn contains_checks_full_enclosure() {
      let outer = Rect::new(0, 0, 100, 100);
      assert!(outer.contains(&Rect::new(10, 10, 20, 20)));
      assert!(outer.contains(&outer));
      assert!(!outer.contains(&Rect::new(90, 90, 110, 110)));
    }

    #[test]
    fn contains_point_excludes_far_edges() {
      let r = Rect::new(0, 0, 10, 10);
      assert!(r.contains_point(Point::new(0, 0)));
      assert!(!r.contains_point(Point::new(10, 5)));
    }

    #[test]
    fn union_ignores_empty() {
      let a = Rect::new(0, 0, 10, 10);
      let empty = Rect::new(50, 50, 50, 60);
      assert_eq!(a.union(&empty), a);
      assert_eq!(a.union(&Rect::new(20, 20, 30, 30)), Rect::new(0, 0, 30, 30));
    }
  }

  mod rect_iou {
    use super::*;

    #[test]
    fn identical_rects_score_one() {
      let a = Rect::new(0, 0, 10, 10);
      assert!((a.iou(&a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_rects_score_zero() {
      let a = Rect::new(0, 0, 10, 10);
      let b = Rect::new(20, 20, 30, 30);
      assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn half_overlap() {
      // Overlap 50, union 150
      let a = Rect::new(0, 0, 10, 10);
      let b = Rect::new(5, 0, 15, 10);
      assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-9);
    }
  }
}
