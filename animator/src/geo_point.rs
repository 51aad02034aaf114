use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees. Ranges aren't validated; that's up to whoever builds these.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in meters, using the haversine formula on a sphere with the mean
    /// Earth radius.
    pub fn dist_to(self, other: GeoPoint) -> f64 {
        Haversine.distance(self.to_point(), other.to_point())
    }

    /// Linear interpolation in lat/lng space, not along the geodesic. Fine for the segment
    /// lengths routes have. `t` of 0 and 1 return the endpoints exactly.
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        // a*(1-t) + b*t, rather than a + (b-a)*t, so both endpoints are exact
        GeoPoint {
            lat: self.lat * (1.0 - t) + other.lat * t,
            lng: self.lng * (1.0 - t) + other.lng * t,
        }
    }

    fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    a.dist_to(b)
}

pub fn interpolate(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    a.lerp(b, t)
}

/// Parses the "lat,lng" strings that routes and victim lists are exchanged as.
impl FromStr for GeoPoint {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let mut parts = raw.split(',');
        let (lat, lng) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lng), None) => (lat.trim(), lng.trim()),
            _ => bail!("{:?} isn't of the form \"lat,lng\"", raw),
        };
        let lat = lat
            .parse::<f64>()
            .with_context(|| format!("bad latitude in {:?}", raw))?;
        let lng = lng
            .parse::<f64>()
            .with_context(|| format!("bad longitude in {:?}", raw))?;
        if !lat.is_finite() || !lng.is_finite() {
            bail!("{:?} has a non-finite coordinate", raw);
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses a whole list of "lat,lng" strings, reporting which entry was bad.
pub fn parse_points<S: AsRef<str>>(raw: &[S]) -> Result<Vec<GeoPoint>> {
    let mut pts = Vec::with_capacity(raw.len());
    for (idx, x) in raw.iter().enumerate() {
        pts.push(
            x.as_ref()
                .parse::<GeoPoint>()
                .with_context(|| format!("coordinate #{}", idx + 1))?,
        );
    }
    Ok(pts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let pt = GeoPoint::new(46.8527, -121.7604);
        assert_eq!(distance(pt, pt), 0.0);
    }

    #[test]
    fn one_millidegree_at_the_equator() {
        // 0.001 degrees of longitude on the equator is ~111.2m with the mean radius
        let d = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.001));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
        let back = distance(GeoPoint::new(0.0, 0.001), GeoPoint::new(0.0, 0.0));
        assert_eq!(d, back);
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = GeoPoint::new(0.1, -121.7);
        let b = GeoPoint::new(0.3, -121.9);
        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);

        let mid = interpolate(a, b, 0.5);
        assert!((mid.lat - 0.2).abs() < 1e-12);
        assert!((mid.lng + 121.8).abs() < 1e-12);
    }

    #[test]
    fn parse() {
        assert_eq!(
            "46.85, -121.76".parse::<GeoPoint>().unwrap(),
            GeoPoint::new(46.85, -121.76)
        );
        assert!("46.85".parse::<GeoPoint>().is_err());
        assert!("46.85,-121.76,3".parse::<GeoPoint>().is_err());
        assert!("north,-121.76".parse::<GeoPoint>().is_err());
        assert!("NaN,1".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn parse_points_names_the_bad_entry() {
        let err = parse_points(&["1,2", "3,4", "oops"]).unwrap_err();
        assert!(format!("{:#}", err).contains("coordinate #3"));
    }

    #[test]
    fn display_round_trips() {
        let pt = GeoPoint::new(30.3165, 78.0322);
        assert_eq!(pt.to_string().parse::<GeoPoint>().unwrap(), pt);
    }
}
