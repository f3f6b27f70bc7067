//! Planar node locations.
//!
//! A `Location` is stored latitude-first, the order the downstream solver
//! expects, even though the network source calls latitude `y`.  After an
//! optional rotation the two components are no longer true degrees, so
//! distances here are plain Euclidean distances in whatever plane the table
//! lives in.

use serde::{Deserialize, Serialize};

/// A `(lat, long)` pair, possibly rotated.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

impl Location {
    #[inline]
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Build from the network source's `x` (longitude) / `y` (latitude).
    #[inline]
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self { lat: y, long: x }
    }

    /// Euclidean distance in the table's plane.
    #[inline]
    pub fn distance(self, other: Location) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_2(self, other: Location) -> f64 {
        let dlat = self.lat - other.lat;
        let dlong = self.long - other.long;
        dlat * dlat + dlong * dlong
    }

    /// Rotate clockwise by `degrees`, treating `[lat, long]` as a row vector
    /// multiplied by `[[cos θ, sin θ], [−sin θ, cos θ]]`.
    ///
    /// A zero angle returns `self` bit-for-bit.
    pub fn rotated(self, degrees: f64) -> Location {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        Location {
            lat: self.lat * cos - self.long * sin,
            long: self.lat * sin + self.long * cos,
        }
    }

    #[inline]
    pub fn as_array(self) -> [f64; 2] {
        [self.lat, self.long]
    }
}

impl From<[f64; 2]> for Location {
    fn from([lat, long]: [f64; 2]) -> Self {
        Self { lat, long }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.long)
    }
}
