//! Circle-circle overlap removal.
//!
//! This is a position-based correction, not an impulse: overlapping bodies are
//! pushed apart along their center line and the Verlet step picks up the
//! resulting displacement as velocity. Repeating it every sub-step converges
//! stacks toward non-penetration.

use glam::Vec2;

use crate::core::body::Body;
use crate::utils::math::direction_or;

/// Separation axis used when two centers coincide.
pub const DEGENERATE_AXIS: Vec2 = Vec2::X;

/// Pushes `a` and `b` apart if they overlap. Returns whether a correction was applied.
///
/// Each body moves by the other's share of the combined radius, so the larger
/// body moves less. `response` scales the half-overlap removed per call.
pub fn resolve_collision(a: &mut Body, b: &mut Body, response: f32) -> bool {
    let offset = a.position - b.position;
    let dist_sq = offset.length_squared();
    let min_dist = a.radius + b.radius;

    // Written as a negated `<` so a NaN distance counts as no contact.
    if !(dist_sq < min_dist * min_dist) {
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = direction_or(offset, dist, DEGENERATE_AXIS);
    let ratio_a = a.radius / min_dist;
    let ratio_b = b.radius / min_dist;
    let delta = 0.5 * response * (dist - min_dist);

    a.position -= normal * (ratio_b * delta);
    b.position += normal * (ratio_a * delta);
    true
}

/// Penetration depth of two bodies; positive when they overlap.
pub fn overlap(a: &Body, b: &Body) -> f32 {
    a.radius + b.radius - a.position.distance(b.position)
}

/// Mutable references to two distinct bodies of a slice.
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use approx::assert_relative_eq;

    fn body(radius: f32, x: f32, y: f32) -> Body {
        Body::new(radius, Color::WHITE, Vec2::new(x, y))
    }

    #[test]
    fn separated_bodies_untouched() {
        let mut a = body(1.0, 0.0, 0.0);
        let mut b = body(1.0, 2.0, 0.0);
        assert!(!resolve_collision(&mut a, &mut b, 0.75));
        assert_eq!(a.position, Vec2::ZERO);
        assert_eq!(b.position, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn equal_radii_move_symmetrically() {
        let mut a = body(5.0, 0.0, 0.0);
        let mut b = body(5.0, 6.0, 0.0);
        assert!(resolve_collision(&mut a, &mut b, 0.75));

        // delta = 0.375 * (6 - 10) = -1.5, each body moves 0.75.
        assert_relative_eq!(a.position.x, -0.75, epsilon = 1e-5);
        assert_relative_eq!(b.position.x, 6.75, epsilon = 1e-5);
        assert_relative_eq!(a.position.y, 0.0);
    }

    #[test]
    fn larger_body_moves_less() {
        let mut big = body(3.0, 0.0, 0.0);
        let mut small = body(1.0, 3.0, 0.0);
        resolve_collision(&mut big, &mut small, 1.0);

        let big_moved = big.position.x.abs();
        let small_moved = small.position.x - 3.0;
        assert_relative_eq!(small_moved / big_moved, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn coincident_centers_separate_without_nan() {
        let mut a = body(1.0, 4.0, 4.0);
        let mut b = body(1.0, 4.0, 4.0);
        assert!(resolve_collision(&mut a, &mut b, 0.75));
        assert!(a.position.is_finite() && b.position.is_finite());
        assert!(a.position.x > b.position.x);
        assert_relative_eq!(a.position.y, b.position.y);
    }

    #[test]
    fn nan_body_leaves_partner_finite() {
        let mut poisoned = body(1.0, f32::NAN, f32::NAN);
        let mut healthy = body(1.0, 0.0, 0.0);
        assert!(!resolve_collision(&mut poisoned, &mut healthy, 0.75));
        assert!(!resolve_collision(&mut healthy, &mut poisoned, 0.75));
        assert_eq!(healthy.position, Vec2::ZERO);
    }

    #[test]
    fn pair_mut_rejects_aliasing() {
        let mut bodies = vec![body(1.0, 0.0, 0.0), body(2.0, 1.0, 0.0)];
        assert!(pair_mut(&mut bodies, 0, 0).is_none());
        assert!(pair_mut(&mut bodies, 0, 5).is_none());
        let (b1, b0) = pair_mut(&mut bodies, 1, 0).unwrap();
        assert_eq!(b1.radius, 2.0);
        assert_eq!(b0.radius, 1.0);
    }
}
