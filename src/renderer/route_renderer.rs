use crate::{
    route::{Position, Route},
    segment::{self, RouteSegment},
};

/// Owns one loaded route and the segment list derived for the current zoom.
/// The route and its max speed are immutable for the lifetime of a dataset;
/// only the derived segment list changes, and it is always swapped in as a
/// whole so a reader holding the lock never sees a partially rebuilt list.
pub struct RouteRenderer {
    route: Route,
    zoom: i32,
    segments: Vec<RouteSegment>,
    version: u64,
}

impl RouteRenderer {
    /// Builds the renderer and runs the derivation once at the initial zoom,
    /// so the first consumer read is already populated.
    pub fn new(route: Route, initial_zoom: i32) -> Self {
        let segments = segment::segments_for_zoom(&route, initial_zoom);
        RouteRenderer {
            route,
            zoom: initial_zoom,
            segments,
            version: 0,
        }
    }

    /// Applies a zoom change from the map surface, rederiving the segment
    /// list against the current route. A repeat of the current zoom is a
    /// no-op. Returns whether a rederivation happened.
    pub fn set_zoom(&mut self, zoom: i32) -> bool {
        if zoom == self.zoom {
            // same, nothing to do
            return false;
        }
        self.zoom = zoom;
        self.segments = segment::segments_for_zoom(&self.route, zoom);
        self.bump_version();
        true
    }

    /// Replaces the loaded dataset wholesale (new file load). The current
    /// zoom is kept and the segment list rederived immediately.
    pub fn replace(&mut self, route: Route) {
        self.route = route;
        self.segments = segment::segments_for_zoom(&self.route, self.zoom);
        self.bump_version();
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// First route point, for the initial map camera. `None` when the route
    /// is empty; callers fall back to the configured origin.
    pub fn map_center(&self) -> Option<Position> {
        self.route.first_position()
    }

    pub fn get_version_string(&self) -> String {
        format!("\"{:x}\"", self.version)
    }

    pub fn parse_version_string(version_str: &str) -> Option<u64> {
        // Remove quotes if present
        let cleaned = version_str.trim_matches('"');
        u64::from_str_radix(cleaned, 16).ok()
    }

    /// Conditional read: `None` when the client already holds the current
    /// version, otherwise the segment list plus the version to cache.
    pub fn get_segments_if_changed(
        &self,
        client_version: Option<&str>,
    ) -> Option<(&[RouteSegment], String)> {
        match client_version {
            Some(v_str) if (Self::parse_version_string(v_str) == Some(self.version)) => None,
            _ => Some((&self.segments, self.get_version_string())),
        }
    }
}
