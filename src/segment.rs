use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::{
    lod,
    route::{Position, Route, RoutePoint},
    smoothing,
};

/// Discrete speed buckets, rendered as fixed hex colors on the map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpeedColor {
    Red,
    LightRed,
    Orange,
    Yellow,
    Green,
}

impl SpeedColor {
    /// Bucket for a point's speed against the route-wide max. Thresholds are
    /// checked top-down with `>`, first match wins; anything that fails them
    /// all lands on green. A zero or non-finite max makes the ratio
    /// non-finite, which fails every comparison and therefore also lands on
    /// green, so the degenerate all-speeds-zero route renders as the lowest
    /// bucket.
    pub fn for_ratio(speed: f64, global_max: f64) -> SpeedColor {
        let ratio = speed / global_max;
        if ratio > 0.8 {
            SpeedColor::Red
        } else if ratio > 0.6 {
            SpeedColor::LightRed
        } else if ratio > 0.4 {
            SpeedColor::Orange
        } else if ratio > 0.2 {
            SpeedColor::Yellow
        } else {
            SpeedColor::Green
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            SpeedColor::Red => "#FF0000",
            SpeedColor::LightRed => "#FF6666",
            SpeedColor::Orange => "#FFA500",
            SpeedColor::Yellow => "#FFFF00",
            SpeedColor::Green => "#00FF00",
        }
    }
}

// the map widget consumes colors as hex strings
impl Serialize for SpeedColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

/// One colored line piece between two consecutive rendered points. Derived,
/// always rebuilt as a whole list, never mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSegment {
    pub positions: [Position; 2],
    pub color: SpeedColor,
}

/// One segment per consecutive pair of points, colored by the first point's
/// speed. `global_max` is the undecimated route's max so the coloring does
/// not shift with zoom.
pub fn build_segments(points: &[RoutePoint], global_max: f64) -> Vec<RouteSegment> {
    points
        .iter()
        .tuple_windows()
        .map(|(start, end)| RouteSegment {
            positions: [start.position, end.position],
            color: SpeedColor::for_ratio(start.speed, global_max),
        })
        .collect()
}

/// The full derivation for one zoom level: decimate, smooth, pair into
/// colored segments. Pure; everything it depends on is in the arguments, so
/// rerunning it for a new zoom against the same route is the whole recompute.
pub fn segments_for_zoom(route: &Route, zoom: i32) -> Vec<RouteSegment> {
    let sampled = lod::sample_for_zoom(route.points(), zoom);
    let smoothed = smoothing::smooth_for_zoom(&sampled, zoom);
    build_segments(&smoothed, route.max_speed())
}

#[cfg(test)]
mod tests {
    use crate::segment::SpeedColor;

    #[test]
    fn bucket_thresholds() {
        let max = 10.0;
        assert_eq!(SpeedColor::for_ratio(9., max), SpeedColor::Red);
        assert_eq!(SpeedColor::for_ratio(7., max), SpeedColor::LightRed);
        assert_eq!(SpeedColor::for_ratio(5., max), SpeedColor::Orange);
        assert_eq!(SpeedColor::for_ratio(3., max), SpeedColor::Yellow);
        assert_eq!(SpeedColor::for_ratio(1., max), SpeedColor::Green);
        // boundaries are exclusive
        assert_eq!(SpeedColor::for_ratio(8., max), SpeedColor::LightRed);
        assert_eq!(SpeedColor::for_ratio(2., max), SpeedColor::Green);
    }

    #[test]
    fn degenerate_max_falls_through_to_green() {
        assert_eq!(SpeedColor::for_ratio(0., 0.), SpeedColor::Green);
        assert_eq!(SpeedColor::for_ratio(0., f64::NAN), SpeedColor::Green);
    }

    #[test]
    fn hex_tokens() {
        assert_eq!(SpeedColor::Red.hex(), "#FF0000");
        assert_eq!(SpeedColor::Green.hex(), "#00FF00");
    }
}
