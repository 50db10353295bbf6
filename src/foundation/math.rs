/// Maximum gap tolerated between the end of one segment and the start of the next.
pub(crate) const JOIN_EPSILON: f64 = 1e-9;

#[inline]
pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[inline]
pub(crate) fn is_unit(x: f64) -> bool {
    x.is_finite() && (0.0..=1.0).contains(&x)
}

/// Heading of `v` in degrees, `0` pointing along +x and growing toward +y.
#[inline]
pub(crate) fn heading_deg(v: kurbo::Vec2) -> f64 {
    v.atan2().to_degrees()
}

pub(crate) fn points_coincide(a: kurbo::Point, b: kurbo::Point) -> bool {
    (a - b).hypot2() <= JOIN_EPSILON * JOIN_EPSILON
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
