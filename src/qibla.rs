use crate::easy::compass_point;
use crate::{fix_angle, GeoCoordinate};

/// The Kaaba, Masjid al-Haram, Mecca.
pub const KAABA: GeoCoordinate = GeoCoordinate::new_unchecked(21.4225, 39.8262);

/// Mean earth radius used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Direction and distance from an observer to the Kaaba.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaResult {
    /// Initial great-circle bearing, clockwise from true north, in [0, 360).
    pub bearing_degrees: f64,
    pub distance_km: f64,
}

impl QiblaResult {
    /// 16-wind compass label of the bearing, e.g. `"ENE"`.
    pub fn compass_point(&self) -> &'static str {
        compass_point(self.bearing_degrees)
    }

    /// Rotation to draw a Qibla arrow on a display whose top points at
    /// `heading_degrees` (as reported by a compass), in [0, 360).
    pub fn arrow_rotation(&self, heading_degrees: f64) -> f64 {
        fix_angle(self.bearing_degrees - heading_degrees)
    }
}

/// Qibla bearing and distance for `observer`.
///
/// An observer standing on the Kaaba has no meaningful bearing; that case
/// yields bearing 0 and distance 0.
pub fn bearing_and_distance(observer: GeoCoordinate) -> QiblaResult {
    let phi1 = observer.latitude().to_radians();
    let phi2 = KAABA.latitude().to_radians();
    let delta_phi = phi2 - phi1;
    let delta_lambda = (KAABA.longitude() - observer.longitude()).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let distance_km = EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    if distance_km < 1e-6 {
        return QiblaResult {
            bearing_degrees: 0.0,
            distance_km: 0.0,
        };
    }

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    QiblaResult {
        bearing_degrees: fix_angle(y.atan2(x).to_degrees()),
        distance_km,
    }
}
