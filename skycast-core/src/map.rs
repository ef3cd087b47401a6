use crate::{config::DEFAULT_MAP_CENTER, model::Coordinates};

pub const DEFAULT_ZOOM: u8 = 10;
pub const MARKER_LABEL: &str = "Selected Location";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub at: Coordinates,
    pub label: &'static str,
}

/// Viewport state handed to whatever draws the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFocus {
    pub center: Coordinates,
    pub zoom: u8,
    pub marker: Option<Marker>,
}

impl Default for MapFocus {
    fn default() -> Self {
        Self { center: DEFAULT_MAP_CENTER, zoom: DEFAULT_ZOOM, marker: None }
    }
}

impl MapFocus {
    /// Centers on `at` and leaves a single marker there.
    pub fn recenter(&mut self, at: Coordinates) {
        self.center = at;
        self.zoom = DEFAULT_ZOOM;
        self.marker = Some(Marker { at, label: MARKER_LABEL });
    }
}
