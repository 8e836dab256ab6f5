use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{finite, non_negative, GeometryError};

pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    distance_sq(p1, p2).sqrt()
}

pub fn distance_sq(p1: Vec2, p2: Vec2) -> f32 {
    (p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)
}

/// Bearing in degrees from `p1` to `p2`, in (-180, 180].
///
/// Screen space: y grows downwards, so the y difference is flipped before `atan2`
/// to keep 90° pointing "up".
pub fn direction(p1: Vec2, p2: Vec2) -> f32 {
    (-(p2.y - p1.y)).atan2(p2.x - p1.x).to_degrees()
}

/// Wraps an angle in degrees into [0, 360).
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360. {
        0.
    } else {
        wrapped
    }
}

/// Wraps an angle in degrees into (-180, 180], i.e. the shortest signed turn.
#[inline]
pub fn relative_angle(angle: f32) -> f32 {
    let wrapped = wrap_degrees(angle);
    if wrapped > 180. {
        wrapped - 360.
    } else {
        wrapped
    }
}

/// Signed turn from `heading` towards the absolute bearing `bearing`.
#[inline]
pub fn bearing_relative_to(bearing: f32, heading: f32) -> f32 {
    relative_angle(wrap_degrees(bearing) - heading)
}

/// Unit vector for a heading in degrees, 0° along +x and 90° "up" the screen.
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Point of intersection of the lines through `p1 p2` and `q1 q2`, kept only when its x
/// lies inside both segments' x ranges (inclusive).
///
/// Parallel lines, including two vertical ones, never intersect. Only the x range is
/// checked, so a hit on a vertical segment is not bounded in y.
pub fn segment_intersection(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> Option<Vec2> {
    // order both segments left to right
    let (p1, p2) = if p2.x < p1.x { (p2, p1) } else { (p1, p2) };
    let (q1, q2) = if q2.x < q1.x { (q2, q1) } else { (q1, q2) };

    let p_vertical = p2.x - p1.x == 0.;
    let q_vertical = q2.x - q1.x == 0.;

    let poi = match (p_vertical, q_vertical) {
        (true, true) => return None,
        (true, false) => {
            let (q_slope, q_intercept) = slope_intercept(q1, q2);
            Vec2::new(p1.x, q_slope * p1.x + q_intercept)
        }
        (false, true) => {
            let (p_slope, p_intercept) = slope_intercept(p1, p2);
            Vec2::new(q1.x, p_slope * q1.x + p_intercept)
        }
        (false, false) => {
            let (p_slope, p_intercept) = slope_intercept(p1, p2);
            let (q_slope, q_intercept) = slope_intercept(q1, q2);

            if p_slope == q_slope {
                return None;
            }

            let x = (q_intercept - p_intercept) / (p_slope - q_slope);
            Vec2::new(x, q_slope * x + q_intercept)
        }
    };

    let on_segment = |a: Vec2, b: Vec2| poi.x >= a.x && poi.x <= b.x;

    if on_segment(p1, p2) && on_segment(q1, q2) {
        Some(poi)
    } else {
        None
    }
}

#[inline]
fn slope_intercept(a: Vec2, b: Vec2) -> (f32, f32) {
    let slope = (b.y - a.y) / (b.x - a.x);
    (slope, a.y - slope * a.x)
}

/// Axis aligned rectangle in screen space, `top` being the smallest y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        Ok(Rect {
            left: finite("left", left)?,
            top: finite("top", top)?,
            width: non_negative("width", width)?,
            height: non_negative("height", height)?,
        })
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Strict containment, a point on an edge is outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.left && point.x < self.right() && point.y > self.top && point.y < self.bottom()
    }

    /// Edges as segments: top, bottom, left, right.
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let top_left = Vec2::new(self.left, self.top);
        let top_right = Vec2::new(self.right(), self.top);
        let bottom_left = Vec2::new(self.left, self.bottom());
        let bottom_right = Vec2::new(self.right(), self.bottom());

        [
            (top_left, top_right),
            (bottom_left, bottom_right),
            (top_left, bottom_left),
            (top_right, bottom_right),
        ]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;
    use rstest::rstest;

    use super::*;

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-3_f32)
        };
    }

    #[rstest]
    #[case(Vec2::new(0., 0.), Vec2::new(3., 4.), 5.)]
    #[case(Vec2::new(-2., 7.), Vec2::new(1., 3.), 5.)]
    #[case(Vec2::new(10., 10.), Vec2::new(10., 10.), 0.)]
    fn distance_is_symmetric(#[case] a: Vec2, #[case] b: Vec2, #[case] expected: f32) {
        assert_eqf32!(distance(a, b), expected);
        assert_eqf32!(distance(b, a), expected);
    }

    #[rstest]
    #[case(Vec2::new(1., 0.), 0.)]
    #[case(Vec2::new(0., -1.), 90.)]
    #[case(Vec2::new(-1., 0.), 180.)]
    #[case(Vec2::new(0., 1.), -90.)]
    #[case(Vec2::new(1., -1.), 45.)]
    fn direction_screen_space(#[case] to: Vec2, #[case] expected: f32) {
        assert_eqf32!(direction(Vec2::ZERO, to), expected);
    }

    #[test]
    fn heading_vector_matches_direction() {
        for heading in [0_f32, 30., 90., 135., 270., 359.] {
            let target = heading_vector(heading) * 10.;
            assert_eqf32!(wrap_degrees(direction(Vec2::ZERO, target)), heading);
        }
    }

    #[rstest]
    #[case(370., 10.)]
    #[case(-10., 350.)]
    #[case(720., 0.)]
    #[case(-1e-9, 0.)]
    fn wrap_degrees_stays_in_range(#[case] angle: f32, #[case] expected: f32) {
        let wrapped = wrap_degrees(angle);
        assert!((0. ..360.).contains(&wrapped));
        assert_eqf32!(wrapped, expected);
    }

    #[rstest]
    #[case(190., -170.)]
    #[case(180., 180.)]
    #[case(-180., 180.)]
    #[case(-270., 90.)]
    #[case(45., 45.)]
    fn relative_angle_is_shortest_turn(#[case] angle: f32, #[case] expected: f32) {
        assert_eqf32!(relative_angle(angle), expected);
    }

    #[test]
    fn crossing_segments_meet_in_the_middle() {
        let (p1, p2) = (Vec2::new(0., 0.), Vec2::new(10., 10.));
        let (q1, q2) = (Vec2::new(0., 10.), Vec2::new(10., 0.));

        for (a, b, c, d) in [(p1, p2, q1, q2), (p2, p1, q1, q2), (p1, p2, q2, q1), (p2, p1, q2, q1)] {
            let poi = segment_intersection(a, b, c, d).expect("segments cross");
            assert_eqf32!(poi.x, 5.);
            assert_eqf32!(poi.y, 5.);
        }
    }

    #[test]
    fn parallel_segments_do_not_meet() {
        let res = segment_intersection(
            Vec2::new(0., 0.),
            Vec2::new(10., 10.),
            Vec2::new(0., 5.),
            Vec2::new(10., 15.),
        );
        assert_eq!(res, None);

        let vertical = segment_intersection(
            Vec2::new(3., 0.),
            Vec2::new(3., 10.),
            Vec2::new(7., 0.),
            Vec2::new(7., 10.),
        );
        assert_eq!(vertical, None);
    }

    #[test]
    fn vertical_segment_is_solved_at_its_x() {
        let poi = segment_intersection(
            Vec2::new(4., -10.),
            Vec2::new(4., 10.),
            Vec2::new(0., 0.),
            Vec2::new(8., 8.),
        )
        .expect("lines cross at x = 4");
        assert_eqf32!(poi.x, 4.);
        assert_eqf32!(poi.y, 4.);

        let swapped = segment_intersection(
            Vec2::new(0., 0.),
            Vec2::new(8., 8.),
            Vec2::new(4., 10.),
            Vec2::new(4., -10.),
        )
        .expect("lines cross at x = 4");
        assert_eqf32!(swapped.y, 4.);
    }

    #[test]
    fn intersection_outside_segments_is_dropped() {
        let res = segment_intersection(
            Vec2::new(0., 0.),
            Vec2::new(2., 2.),
            Vec2::new(8., 10.),
            Vec2::new(10., 8.),
        );
        assert_eq!(res, None);
    }

    #[test]
    fn rect_contains_is_strict() {
        let rect = Rect::new(90., 90., 20., 20.).unwrap();
        assert!(rect.contains(Vec2::new(100., 100.)));
        assert!(rect.contains(Vec2::new(91., 109.)));
        assert!(!rect.contains(Vec2::new(90., 100.)));
        assert!(!rect.contains(Vec2::new(100., 110.)));
    }

    #[test]
    fn rect_rejects_bad_geometry() {
        assert_eq!(
            Rect::new(0., 0., -1., 5.),
            Err(GeometryError::Negative {
                what: "width",
                value: -1.
            })
        );
        assert!(matches!(
            Rect::new(f32::NAN, 0., 1., 1.),
            Err(GeometryError::NonFinite { what: "left", .. })
        ));
    }
}
