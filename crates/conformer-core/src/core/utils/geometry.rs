use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

/// Smallest axis length accepted when building an axis-angle rotation.
pub const AXIS_EPSILON: f64 = 1e-12;

/// Builds the unit quaternion rotating by `angle_degrees` about `axis`.
///
/// The axis does not need to be normalized. Returns `None` when the angle is not
/// finite, or the axis has (near) zero length or non-finite components.
pub fn quaternion_from_axis_angle(
    axis: &Vector3<f64>,
    angle_degrees: f64,
) -> Option<UnitQuaternion<f64>> {
    if !axis.iter().all(|c| c.is_finite()) || !angle_degrees.is_finite() {
        return None;
    }
    let axis = Unit::try_new(*axis, AXIS_EPSILON)?;
    Some(UnitQuaternion::from_axis_angle(
        &axis,
        angle_degrees.to_radians(),
    ))
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}
