// ── Coordinates, positioning and map deep links ──

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::error::CoreError;

/// Base of the turn-by-turn directions link handed to field crews.
pub const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build a position, rejecting values outside the valid degree ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, LocateError> {
        let coords = Self { lat, lng };
        if coords.is_valid() {
            Ok(coords)
        } else {
            Err(LocateError::OutOfRange { lat, lng })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Directions link with this position as the destination.
    pub fn directions_url(&self) -> Result<Url, CoreError> {
        let raw = format!(
            "{DIRECTIONS_BASE}?api=1&destination={},{}",
            self.lat, self.lng
        );
        Url::parse(&raw).map_err(|e| CoreError::Internal(format!("invalid directions URL: {e}")))
    }
}

/// `lat, lng` with six decimals, the form written into report fields.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

// ── Positioning ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    #[error("current location is unavailable: no position source is configured")]
    Unavailable,

    #[error("position {lat}, {lng} is outside the valid range")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Source of the reporter's current position.
pub trait Locator: Send + Sync {
    fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// Locator backed by a fixed position from configuration.
///
/// Terminals have no positioning hardware to query, so the position is
/// whatever the operator configured. Without one, lookups fail loudly.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocator {
    position: Option<(f64, f64)>,
}

impl ConfiguredLocator {
    pub fn new(position: Option<(f64, f64)>) -> Self {
        Self { position }
    }
}

impl Locator for ConfiguredLocator {
    fn locate(&self) -> Result<Coordinates, LocateError> {
        let (lat, lng) = self.position.ok_or(LocateError::Unavailable)?;
        Coordinates::new(lat, lng)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn directions_url_embeds_destination() {
        let coords = Coordinates::new(9.9312, 76.2673).unwrap();
        assert_eq!(
            coords.directions_url().unwrap().as_str(),
            "https://www.google.com/maps/dir/?api=1&destination=9.9312,76.2673"
        );
    }

    #[test]
    fn display_uses_six_decimals() {
        let coords = Coordinates::new(10.5276, 76.2144).unwrap();
        assert_eq!(coords.to_string(), "10.527600, 76.214400");
    }

    #[test]
    fn rejects_out_of_range_positions() {
        assert_eq!(
            Coordinates::new(91.0, 0.0),
            Err(LocateError::OutOfRange { lat: 91.0, lng: 0.0 })
        );
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn configured_locator_without_position_fails() {
        let locator = ConfiguredLocator::default();
        assert_eq!(locator.locate(), Err(LocateError::Unavailable));
    }

    #[test]
    fn configured_locator_returns_position() {
        let locator = ConfiguredLocator::new(Some((8.5241, 76.9366)));
        let coords = locator.locate().unwrap();
        assert_eq!(coords.to_string(), "8.524100, 76.936600");
    }
}
