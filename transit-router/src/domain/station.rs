//! Station types.

use std::fmt;

use geo::Point;

use super::DomainError;

/// Geographic position of a station, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::domain::Coordinates;
    ///
    /// let c = Coordinates::new(40.7309, -73.9816).unwrap();
    /// assert_eq!(c.lat(), 40.7309);
    ///
    /// assert!(Coordinates::new(91.0, 0.0).is_err());
    /// assert!(Coordinates::new(0.0, f64::NAN).is_err());
    /// ```
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinates { lat, lon });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinates { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// As a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// A named transit stop with fixed coordinates.
///
/// The name is the station's unique identifier within a graph. Leading and
/// trailing whitespace is stripped at construction; an empty name is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    name: String,
    coordinates: Coordinates,
}

impl Station {
    /// Create a station.
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStationName);
        }
        let name = if trimmed.len() == name.len() {
            name
        } else {
            trimmed.to_string()
        };
        Ok(Self { name, coordinates })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Coordinates {
        Coordinates::new(40.731352, -73.954449).unwrap()
    }

    #[test]
    fn valid_coordinates() {
        assert!(Coordinates::new(0.0, 0.0).is_ok());
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(-90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
    }

    #[test]
    fn reject_non_finite() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn point_is_lon_lat() {
        let p = coords().to_point();
        assert_eq!(p.x(), -73.954449);
        assert_eq!(p.y(), 40.731352);
    }

    #[test]
    fn station_name_is_trimmed() {
        let s = Station::new("  Greenpoint Av ", coords()).unwrap();
        assert_eq!(s.name(), "Greenpoint Av");
        assert_eq!(s.to_string(), "Greenpoint Av");
    }

    #[test]
    fn reject_empty_name() {
        assert!(matches!(
            Station::new("   ", coords()),
            Err(DomainError::EmptyStationName)
        ));
        assert!(Station::new("", coords()).is_err());
    }
}
