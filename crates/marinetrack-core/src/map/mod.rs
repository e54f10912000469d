//! External map surface contract, marker icons and the readiness gate.
//!
//! The rendering widget itself lives outside this crate. The core only needs
//! to place markers, move the camera and listen to the cursor; everything
//! else about the widget is opaque.

mod headless;
mod sync;

pub use headless::*;
pub use sync::*;

use serde::{Deserialize, Serialize};

use crate::components::{GeoPoint, Vessel};
use crate::error::MapError;

/// Marker size of the tracked vessel, px
pub const TRACKED_ICON_SIZE: u32 = 18;
/// Marker size of ambient vessels, px
pub const AMBIENT_ICON_SIZE: u32 = 13;

/// Operations the core issues against a live map
pub trait MapWidget {
    fn add_tile_layer(&mut self, url_template: &str);

    /// Create the marker for `id` or move/restyle the existing one
    fn add_or_update_marker(&mut self, id: &str, at: GeoPoint, icon: &IconSpec);

    /// Create the line `id` or replace its points and style
    fn add_polyline(&mut self, id: &str, points: &[GeoPoint], style: &LineStyle);

    fn fly_to(&mut self, at: GeoPoint, zoom: u8, duration_secs: f64);

    fn on_mouse_move(&mut self, callback: Box<dyn FnMut(GeoPoint)>);
}

/// Creates a map inside a host container
pub trait MapFactory {
    type Map: MapWidget;

    fn create_map(&mut self, container: &str, center: GeoPoint, zoom: u8) -> Result<Self::Map, MapError>;
}

/// Renderer-agnostic marker description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconSpec {
    /// CSS color of the glyph fill
    pub color: String,
    pub size_px: u32,
    /// Clockwise from north, degrees
    pub rotation_deg: f64,
    pub halo: bool,
    pub stroke_color: String,
    pub stroke_width: f64,
    /// Hover tooltip text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl IconSpec {
    /// Ship glyph for a vessel. The tracked vessel is larger, white-stroked
    /// and haloed.
    pub fn for_vessel(vessel: &Vessel) -> Self {
        let tracked = vessel.is_scripted();
        Self {
            color: vessel.kind.color().to_string(),
            size_px: if tracked {
                TRACKED_ICON_SIZE
            } else {
                AMBIENT_ICON_SIZE
            },
            rotation_deg: vessel.heading,
            halo: tracked,
            stroke_color: if tracked {
                "#fff".to_string()
            } else {
                "rgba(0,0,0,0.35)".to_string()
            },
            stroke_width: if tracked { 1.5 } else { 0.8 },
            label: None,
        }
    }

    /// Labelled diamond marker for a port
    pub fn port(color: &str, label: &str) -> Self {
        Self {
            color: color.to_string(),
            size_px: 10,
            rotation_deg: 45.0,
            halo: false,
            stroke_color: "#fff".to_string(),
            stroke_width: 2.0,
            label: Some(label.to_string()),
        }
    }

    /// Reference SVG rendering of the ship glyph
    pub fn to_svg(&self) -> String {
        let s = self.size_px as f64;
        let halo = if self.halo {
            format!(
                r#"<circle cx="0" cy="0" r="{r}" fill="none" stroke="{stroke}" stroke-width="1.2" opacity="0.5"/>"#,
                r = s * 0.35,
                stroke = self.stroke_color,
            )
        } else {
            String::new()
        };
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{w}" viewBox="{o} {o} {w} {w}">"#,
                r#"<g transform="rotate({rot})">"#,
                r#"<polygon points="0,{bow} {beam},{stern} 0,{notch} {nbeam},{stern}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}" opacity="0.95"/>"#,
                "{halo}</g></svg>"
            ),
            w = s * 2.0,
            o = -s,
            rot = self.rotation_deg,
            bow = -s * 0.9,
            beam = s * 0.45,
            nbeam = -s * 0.45,
            stern = s * 0.7,
            notch = s * 0.4,
            fill = self.color,
            stroke = self.stroke_color,
            sw = self.stroke_width,
            halo = halo,
        )
    }
}

/// Stroke of a polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    /// Dash pattern in px, e.g. `"8, 6"`; solid when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

impl LineStyle {
    /// Dashed gold track of the tracked vessel's route
    pub fn route(color: &str) -> Self {
        Self {
            color: color.to_string(),
            weight: 2.0,
            opacity: 0.5,
            dash_array: Some("8, 6".to_string()),
        }
    }
}

/// A camera move: zoom level and flight duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMove {
    pub zoom: u8,
    pub duration_secs: f64,
}

/// Two-state readiness gate in front of the map surface
pub enum MapGate<M> {
    NotReady,
    Ready(M),
}

impl<M> MapGate<M> {
    pub fn is_ready(&self) -> bool {
        matches!(self, MapGate::Ready(_))
    }

    pub fn get(&self) -> Option<&M> {
        match self {
            MapGate::Ready(map) => Some(map),
            MapGate::NotReady => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut M> {
        match self {
            MapGate::Ready(map) => Some(map),
            MapGate::NotReady => None,
        }
    }
}

impl<M> Default for MapGate<M> {
    fn default() -> Self {
        MapGate::NotReady
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;

    fn vessel(motion: Motion, kind: VesselKind) -> Vessel {
        Vessel {
            id: "x".into(),
            name: "X".into(),
            kind,
            position: GeoPoint::ORIGIN,
            heading: 123.0,
            speed_knots: 10.0,
            status: VesselStatus::EnRoute,
            motion,
            itinerary: Itinerary {
                from: String::new(),
                to: String::new(),
                cargo: String::new(),
                built_year: 2000,
                length_m: 100,
                tonnage_gt: 1000,
                mmsi: "200000000".into(),
                flag: "FR".into(),
            },
        }
    }

    #[test]
    fn test_tracked_icon_is_distinct() {
        let tracked = IconSpec::for_vessel(&vessel(
            Motion::Scripted { progress: 0.5 },
            VesselKind::Special,
        ));
        let ambient = IconSpec::for_vessel(&vessel(
            Motion::Ambient {
                velocity: Velocity::default(),
            },
            VesselKind::Cargo,
        ));
        assert!(tracked.size_px > ambient.size_px);
        assert!(tracked.halo);
        assert!(!ambient.halo);
        assert_ne!(tracked.stroke_color, ambient.stroke_color);
        assert_eq!(ambient.color, "#2ed573");
        assert_eq!(tracked.rotation_deg, 123.0);
    }

    #[test]
    fn test_svg_rotation_and_halo() {
        let icon = IconSpec::for_vessel(&vessel(
            Motion::Scripted { progress: 0.1 },
            VesselKind::Special,
        ));
        let svg = icon.to_svg();
        assert!(svg.contains("rotate(123)"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("#ffd700"));
    }

    #[test]
    fn test_gate() {
        let mut gate: MapGate<u32> = MapGate::default();
        assert!(!gate.is_ready());
        assert!(gate.get_mut().is_none());
        gate = MapGate::Ready(7);
        assert_eq!(gate.get(), Some(&7));
    }

    #[test]
    fn test_port_icon_carries_label() {
        let port = IconSpec::port("#00d4ff", "Halifax (Départ)");
        assert_eq!(port.label.as_deref(), Some("Halifax (Départ)"));
        assert_eq!(port.rotation_deg, 45.0);

        let ship = IconSpec::for_vessel(&vessel(
            Motion::Scripted { progress: 0.1 },
            VesselKind::Special,
        ));
        assert_eq!(ship.label, None);
    }

    #[test]
    fn test_route_line_is_dashed() {
        let style = LineStyle::route("#ffd700");
        assert_eq!(style.dash_array.as_deref(), Some("8, 6"));
        assert_eq!(style.weight, 2.0);
    }
}
