use crate::route::{Position, RoutePoint};

/// Neighbor weight for a zoom level: zero at zoom 15 and above, then growing
/// linearly as the view zooms out, capped at 0.35.
pub fn strength_for_zoom(zoom: i32) -> f64 {
    if zoom >= 15 {
        0.0
    } else {
        // widen before subtracting so extreme zoom values cannot overflow
        (((15i64 - i64::from(zoom)) as f64) * 0.05).min(0.35)
    }
}

/// Far-out views get a second smoothing pass on top of the stronger weight.
pub fn passes_for_zoom(zoom: i32) -> u32 {
    if zoom < 12 {
        2
    } else {
        1
    }
}

/// One pass of neighbor-weighted positional averaging. The first and last
/// point are never moved and speeds are never touched. Interior point `i`
/// becomes `(prev*w + curr*(1-2w) + next*w) / (1 - 2w + 2w)` per coordinate.
/// The divisor is kept in that literal form: it is not bit-exactly 1.0 for
/// every `w`, and the filter output must not drift across passes.
///
/// With fewer than 3 points or zero strength the input is returned unchanged.
pub fn smooth(points: &[RoutePoint], strength: f64) -> Vec<RoutePoint> {
    if points.len() < 3 || strength == 0.0 {
        return points.to_vec();
    }

    let w = strength;
    let norm = 1.0 - 2.0 * w + 2.0 * w;
    points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            if idx == 0 || idx == points.len() - 1 {
                return *point;
            }

            let prev = points[idx - 1].position;
            let curr = point.position;
            let next = points[idx + 1].position;

            let latitude =
                (prev.latitude * w + curr.latitude * (1.0 - 2.0 * w) + next.latitude * w) / norm;
            let longitude =
                (prev.longitude * w + curr.longitude * (1.0 - 2.0 * w) + next.longitude * w) / norm;

            RoutePoint {
                position: Position {
                    latitude,
                    longitude,
                },
                speed: point.speed,
            }
        })
        .collect()
}

/// Applies the zoom-derived number of passes at the zoom-derived strength.
pub fn smooth_for_zoom(points: &[RoutePoint], zoom: i32) -> Vec<RoutePoint> {
    let strength = strength_for_zoom(zoom);
    let mut smoothed = points.to_vec();
    for _ in 0..passes_for_zoom(zoom) {
        smoothed = smooth(&smoothed, strength);
    }
    smoothed
}

#[cfg(test)]
mod tests {
    use crate::smoothing::{passes_for_zoom, strength_for_zoom};

    #[test]
    fn strength_by_zoom() {
        assert_eq!(strength_for_zoom(18), 0.0);
        assert_eq!(strength_for_zoom(15), 0.0);
        assert_eq!(strength_for_zoom(14), 0.05);
        assert_eq!(strength_for_zoom(10), 0.25);
        // capped from zoom 8 downwards
        assert_eq!(strength_for_zoom(8), 0.35);
        assert_eq!(strength_for_zoom(0), 0.35);
    }

    #[test]
    fn passes_by_zoom() {
        assert_eq!(passes_for_zoom(15), 1);
        assert_eq!(passes_for_zoom(12), 1);
        assert_eq!(passes_for_zoom(11), 2);
        assert_eq!(passes_for_zoom(5), 2);
    }
}
