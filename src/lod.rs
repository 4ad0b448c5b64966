use crate::route::RoutePoint;

/// Decimation stride for a zoom level: `max(1, 2^max(0, 15 - zoom))`. At
/// zoom 15 and above every point is kept; each zoom step below 15 doubles the
/// stride, keeping on-screen point density roughly constant as the user zooms
/// out.
pub fn skip_for_zoom(zoom: i32) -> usize {
    // widen before subtracting so extreme zoom values cannot overflow
    let exponent = (15i64 - i64::from(zoom)).clamp(0, i64::from(usize::BITS) - 1);
    1usize << (exponent as u32)
}

/// Strided subset of `points` for a zoom level, taking indices
/// `0, skip, 2*skip, ...`. The last point is appended whenever the stride did
/// not land on it, so the rendered route never appears truncated. Lists of 0
/// or 1 points pass through unchanged.
pub fn sample_for_zoom(points: &[RoutePoint], zoom: i32) -> Vec<RoutePoint> {
    if points.len() <= 1 {
        return points.to_vec();
    }
    let skip = skip_for_zoom(zoom);
    let mut sampled: Vec<RoutePoint> = points.iter().copied().step_by(skip).collect();
    if (points.len() - 1) % skip != 0 {
        sampled.push(points[points.len() - 1]);
    }
    sampled
}
