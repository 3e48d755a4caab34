use glam::Vec2;

use crate::config::BoundaryPolicy;
use crate::core::body::Body;

/// Keeps a body inside the domain described by `policy`.
pub fn apply_boundary(body: &mut Body, policy: &BoundaryPolicy) {
    match *policy {
        BoundaryPolicy::Rect {
            width,
            height,
            damping,
        } => clamp_to_rect(body, Vec2::new(width, height), damping),
        BoundaryPolicy::Circle { center, radius } => contain_in_circle(body, center, radius),
    }
}

/// Snaps a body back inside `[0, bounds]` on every axis it crossed and keeps
/// `damping` of its implied velocity along that axis, reversed.
pub fn clamp_to_rect(body: &mut Body, bounds: Vec2, damping: f32) {
    for axis in 0..2 {
        let r = body.radius;
        let limit = bounds[axis];
        let pos = body.position[axis];

        let snapped = if pos - r < 0.0 {
            r
        } else if pos + r > limit {
            limit - r
        } else {
            continue;
        };

        body.position[axis] = snapped;
        body.position_last[axis] = snapped + (body.position_last[axis] - snapped) * damping;
    }
}

/// Projects a body back onto the circle of `radius - body.radius` around `center`.
pub fn contain_in_circle(body: &mut Body, center: Vec2, radius: f32) {
    let offset = body.position - center;
    let dist = offset.length();
    let limit = (radius - body.radius).max(0.0);

    if dist > limit {
        body.position = center + offset / dist * limit;
    }
}

/// True when `body` satisfies `policy` within `tolerance`.
pub fn is_contained(body: &Body, policy: &BoundaryPolicy, tolerance: f32) -> bool {
    match *policy {
        BoundaryPolicy::Rect { width, height, .. } => {
            let r = body.radius;
            let p = body.position;
            p.x >= r - tolerance
                && p.x <= width - r + tolerance
                && p.y >= r - tolerance
                && p.y <= height - r + tolerance
        }
        BoundaryPolicy::Circle { center, radius } => {
            body.position.distance(center) <= (radius - body.radius).max(0.0) + tolerance
        }
    }
}
