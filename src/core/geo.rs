use crate::core::constants::{MAP_EAST, MAP_HEIGHT, MAP_NORTH, MAP_SOUTH, MAP_WEST, MAP_WIDTH};
use serde::{Deserialize, Serialize};

/// A geographical coordinate in fixed-point degrees (degrees x 100_000)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: i32,
    pub lon: i32,
}

impl GeoPoint {
    /// Creates a new fixed-point coordinate
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Manhattan distance in raw fixed-point units.
    ///
    /// No latitude correction is applied; the metric only has to order
    /// venues that are close to each other.
    pub fn manhattan_distance(&self, other: &GeoPoint) -> u32 {
        self.lon
            .abs_diff(other.lon)
            .saturating_add(self.lat.abs_diff(other.lat))
    }
}

/// A position in map image pixels or on-screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x + other.x, self.y + other.y)
    }
}

/// Map axis: latitude runs along pixel Y, longitude along pixel X
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Re-maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Integer interpolation truncating toward zero, widened to i64 so the
/// products of image extents and fixed-point spans cannot overflow.
pub fn map_range(value: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Linear calibration between the map image and geographic space.
///
/// Pixel `(0, 0)` is the north-west corner; Y grows southward, so latitude
/// decreases as the pixel row increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoCalibration {
    pub width: i32,
    pub height: i32,
    pub north: i32,
    pub south: i32,
    pub west: i32,
    pub east: i32,
}

impl Default for GeoCalibration {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            north: MAP_NORTH,
            south: MAP_SOUTH,
            west: MAP_WEST,
            east: MAP_EAST,
        }
    }
}

impl GeoCalibration {
    /// Pixel extent and the geographic values at pixel 0 and at the far edge
    fn axis_span(&self, axis: Axis) -> (i64, i64, i64) {
        match axis {
            Axis::Latitude => (self.height as i64, self.north as i64, self.south as i64),
            Axis::Longitude => (self.width as i64, self.west as i64, self.east as i64),
        }
    }

    /// Converts a pixel coordinate along `axis` into a fixed-point geographic value
    pub fn pixel_to_geo(&self, axis: Axis, pixel: i32) -> i32 {
        let (extent, at_origin, at_far_edge) = self.axis_span(axis);
        map_range(pixel as i64, 0, extent, at_origin, at_far_edge) as i32
    }

    /// Converts a fixed-point geographic value along `axis` into a pixel coordinate
    pub fn geo_to_pixel(&self, axis: Axis, geo: i32) -> i32 {
        let (extent, at_origin, at_far_edge) = self.axis_span(axis);
        map_range(geo as i64, at_origin, at_far_edge, 0, extent) as i32
    }

    /// Geographic position of a global image pixel
    pub fn cursor_to_geo(&self, pixel: PixelPoint) -> GeoPoint {
        GeoPoint::new(
            self.pixel_to_geo(Axis::Latitude, pixel.y),
            self.pixel_to_geo(Axis::Longitude, pixel.x),
        )
    }

    /// Global image pixel of a geographic position
    pub fn geo_to_cursor(&self, point: GeoPoint) -> PixelPoint {
        PixelPoint::new(
            self.geo_to_pixel(Axis::Longitude, point.lon),
            self.geo_to_pixel(Axis::Latitude, point.lat),
        )
    }

    /// Checks that both axes have a non-degenerate span
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.north != self.south && self.west != self.east
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_calibration_corners() {
        let cal = GeoCalibration::default();
        assert_eq!(cal.pixel_to_geo(Axis::Latitude, 0), MAP_NORTH);
        assert_eq!(cal.pixel_to_geo(Axis::Latitude, MAP_HEIGHT), MAP_SOUTH);
        assert_eq!(cal.pixel_to_geo(Axis::Longitude, 0), MAP_WEST);
        assert_eq!(cal.pixel_to_geo(Axis::Longitude, MAP_WIDTH), MAP_EAST);

        assert_eq!(cal.geo_to_pixel(Axis::Latitude, MAP_SOUTH), MAP_HEIGHT);
        assert_eq!(cal.geo_to_pixel(Axis::Longitude, MAP_WEST), 0);
    }

    #[test]
    fn test_latitude_decreases_southward() {
        let cal = GeoCalibration::default();
        let top = cal.pixel_to_geo(Axis::Latitude, 10);
        let below = cal.pixel_to_geo(Axis::Latitude, 500);
        assert!(below < top);
    }

    #[test]
    fn test_round_trip_every_pixel() {
        let cal = GeoCalibration::default();
        for p in 0..=MAP_WIDTH {
            let lon = cal.pixel_to_geo(Axis::Longitude, p);
            assert!((cal.geo_to_pixel(Axis::Longitude, lon) - p).abs() <= 1, "x = {p}");
        }
        for p in 0..=MAP_HEIGHT {
            let lat = cal.pixel_to_geo(Axis::Latitude, p);
            assert!((cal.geo_to_pixel(Axis::Latitude, lat) - p).abs() <= 1, "y = {p}");
        }
    }

    #[test]
    fn test_cursor_to_geo_uses_both_axes() {
        let cal = GeoCalibration::default();
        let geo = cal.cursor_to_geo(PixelPoint::new(1024, 1024));
        assert_eq!(geo.lon, cal.pixel_to_geo(Axis::Longitude, 1024));
        assert_eq!(geo.lat, cal.pixel_to_geo(Axis::Latitude, 1024));

        let back = cal.geo_to_cursor(geo);
        assert!((back.x - 1024).abs() <= 1);
        assert!((back.y - 1024).abs() <= 1);
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GeoPoint::new(100, -50);
        let b = GeoPoint::new(90, -20);
        assert_eq!(a.manhattan_distance(&b), 40);
        assert_eq!(b.manhattan_distance(&a), 40);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn test_manhattan_distance_saturates() {
        let a = GeoPoint::new(i32::MIN, i32::MIN);
        let b = GeoPoint::new(i32::MAX, i32::MAX);
        assert_eq!(a.manhattan_distance(&b), u32::MAX);
    }

    proptest! {
        #[test]
        fn round_trip_within_one_pixel(
            north in -100_000_000i32..100_000_000,
            lat_span in 2_048i32..1_000_000,
            west in -100_000_000i32..100_000_000,
            lon_span in 2_048i32..1_000_000,
            x in 0i32..=2_048,
            y in 0i32..=2_048,
        ) {
            let cal = GeoCalibration {
                north,
                south: north - lat_span,
                west,
                east: west + lon_span,
                ..GeoCalibration::default()
            };
            let back = cal.geo_to_cursor(cal.cursor_to_geo(PixelPoint::new(x, y)));
            prop_assert!((back.x - x).abs() <= 1);
            prop_assert!((back.y - y).abs() <= 1);
        }
    }
}
