use std::collections::HashMap;

use serde::Serialize;

use crate::utils::geo::GeoPoint;

pub const DEFAULT_ZOOM: u8 = 13;
pub const MAX_ZOOM: u8 = 22;
pub const DEFAULT_MARKER_COLOR: &str = "#4A90E2";
pub const DEFAULT_MARKER_TITLE: &str = "Location";
pub const CURRENT_LOCATION_COLOR: &str = "#51CF66";
pub const CURRENT_LOCATION_TITLE: &str = "Your Location";

/// Circle icon drawn for every marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerIcon {
    pub fill_color: String,
    pub scale: u32,
    pub fill_opacity: f32,
    pub stroke_weight: u32,
    pub stroke_color: String,
}

impl MarkerIcon {
    pub fn circle(fill_color: &str) -> Self {
        Self {
            fill_color: fill_color.to_string(),
            scale: 10,
            fill_opacity: 1.0,
            stroke_weight: 2,
            stroke_color: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: GeoPoint,
    pub title: String,
    pub icon: MarkerIcon,
}

impl Marker {
    pub fn new(position: GeoPoint, title: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            position,
            title: title.into(),
            icon: MarkerIcon::circle(color.unwrap_or(DEFAULT_MARKER_COLOR)),
        }
    }
}

/// Everything a front end needs to draw one map element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub element_id: String,
    pub center: GeoPoint,
    pub zoom: u8,
    pub hide_poi_labels: bool,
    pub markers: Vec<Marker>,
}

impl MapConfig {
    pub fn new(element_id: impl Into<String>, center: GeoPoint, zoom: Option<u8>) -> Self {
        Self {
            element_id: element_id.into(),
            center,
            zoom: zoom.unwrap_or(DEFAULT_ZOOM).min(MAX_ZOOM),
            hide_poi_labels: true,
            markers: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Build a map from an element's `data-*` attributes (keys without the prefix).
    ///
    /// Returns `None` when `lat` or `lng` is missing, unparsable or out of range.
    pub fn from_data_attributes(index: usize, attrs: &HashMap<String, String>) -> Option<Self> {
        let lat = parse_float(attrs.get("lat")?)?;
        let lng = parse_float(attrs.get("lng")?)?;
        let center = GeoPoint::new(lat, lng).ok()?;

        let zoom = attrs.get("zoom").and_then(|z| parse_leading_int(z));
        let element_id = attrs
            .get("id")
            .filter(|id| !id.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("map-{}", index));
        let title = attrs
            .get("title")
            .filter(|t| !t.is_empty())
            .map(String::as_str)
            .unwrap_or(DEFAULT_MARKER_TITLE);

        Some(Self::new(element_id, center, zoom).with_marker(Marker::new(center, title, None)))
    }

    /// Map centred on the user's own position
    pub fn current_location(element_id: impl Into<String>, position: GeoPoint) -> Self {
        Self::new(element_id, position, None).with_marker(Marker::new(
            position,
            CURRENT_LOCATION_TITLE,
            Some(CURRENT_LOCATION_COLOR),
        ))
    }
}

/// Whole-string parse: "40.7abc" is rejected rather than read as 40.7,
/// so a typo in an attribute skips the element instead of misplacing it.
fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

/// "14", "14.7" and "14px" all read as 14; anything without leading digits is None
fn parse_leading_int(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let digits = &raw[..end];
    if digits.is_empty() {
        return None;
    }
    // Overflowing values still mean "zoomed all the way in"
    Some(digits.parse::<u8>().unwrap_or(MAX_ZOOM))
}
