//! Turns pointer drags into direction vectors for [`crate::token::TokenController`]
use crate::constants::SWIPE_THRESHOLD;
use nalgebra::{Point2, Vector2};

/// Tracks a single pointer and reports a swipe once it has travelled far enough
///
/// # Examples
///
/// ```
/// use maze_ball::swipe::SwipeRecognizer;
/// use nalgebra::Point2;
///
/// let mut swipe = SwipeRecognizer::default();
/// swipe.begin(Point2::new(100.0, 100.0));
/// assert_eq!(swipe.update(Point2::new(120.0, 100.0)), None);
///
/// let v = swipe.update(Point2::new(180.0, 110.0)).unwrap();
/// assert!(v.x > 0.9 && v.norm() <= 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeRecognizer {
    threshold: f32,
    first: Point2<f32>,
    second: Point2<f32>,
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl SwipeRecognizer {
    /// Recognize swipes of at least `threshold` units
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            first: Point2::origin(),
            second: Point2::origin(),
        }
    }

    /// The pointer went down at `position`
    pub fn begin(&mut self, position: Point2<f32>) {
        self.first = position;
        self.second = position;
    }

    /// The pointer moved to, or is held at, `position`
    ///
    /// Once it is at least the threshold away from where it went down, returns the
    /// displacement clamped to a length of at most 1 and forgets both points.
    pub fn update(&mut self, position: Point2<f32>) -> Option<Vector2<f32>> {
        self.second = position;
        let delta = self.second - self.first;
        if delta.norm() < self.threshold {
            return None;
        }

        self.first = Point2::origin();
        self.second = Point2::origin();
        Some(delta.cap_magnitude(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::movement::normalize_direction;

    #[test]
    fn short_drag_is_ignored() {
        let mut swipe = SwipeRecognizer::default();
        swipe.begin(Point2::new(10.0, 10.0));
        assert_eq!(swipe.update(Point2::new(40.0, 40.0)), None);
        assert_eq!(swipe.update(Point2::new(10.0, 59.0)), None);
    }

    #[test]
    fn swipe_direction() {
        let mut swipe = SwipeRecognizer::default();
        swipe.begin(Point2::new(0.0, 0.0));
        let v = swipe.update(Point2::new(-10.0, -80.0)).unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-5);
        assert_eq!(normalize_direction(v), Some(Direction::South));
    }

    #[test]
    fn points_reset_after_swipe() {
        let mut swipe = SwipeRecognizer::new(50.0);
        swipe.begin(Point2::new(200.0, 200.0));
        assert!(swipe.update(Point2::new(260.0, 200.0)).is_some());
        // the next update measures from the origin
        assert!(swipe.update(Point2::new(30.0, 0.0)).is_none());
        assert!(swipe.update(Point2::new(0.0, 70.0)).is_some());
    }
}
