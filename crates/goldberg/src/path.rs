//! Pure path utilities feeding the rope builder.

use crate::{
    error::{ensure_positive, Result},
    math::{point::Point, FloatNum},
};

/// Sample `segments + 1` points tracing the arc from `start_angle` to
/// `end_angle` around `center`, angles equally spaced.
///
/// Screen convention: y grows downward, so a growing angle walks the
/// arc counterclockwise on screen.
pub fn sample_arc(
    center: impl Into<Point>,
    radius: FloatNum,
    start_angle: FloatNum,
    end_angle: FloatNum,
    segments: usize,
) -> Result<Vec<Point>> {
    ensure_positive("arc radius", radius)?;

    let center = center.into();
    let segments = segments.max(1);
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as FloatNum / segments as FloatNum;
        let angle = start_angle + (end_angle - start_angle) * t;
        points.push(Point::new(
            center.x() + radius * angle.cos(),
            center.y() - radius * angle.sin(),
        ));
    }
    Ok(points)
}

/// Walk the polyline and emit equally spaced points so that no two
/// consecutive outputs are further apart than `max_spacing`. The final
/// waypoint is emitted exactly once.
pub fn densify(waypoints: &[Point], max_spacing: FloatNum) -> Result<Vec<Point>> {
    ensure_positive("polyline max spacing", max_spacing)?;

    let Some(&first) = waypoints.first() else {
        return Ok(Vec::new());
    };

    let mut points = vec![first];
    for pair in waypoints.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let length = start.distance(&end);
        let steps = ((length / max_spacing).ceil() as usize).max(1);
        let direction = end - start;
        for i in 1..steps {
            let t = i as FloatNum / steps as FloatNum;
            points.push(start + direction * t);
        }
        // push the endpoint as authored, interpolation drift must not
        // displace the waypoints themselves
        points.push(end);
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::error::Error;

    use super::*;

    #[test]
    fn arc_sampling_count_and_radius() {
        let center = Point::new(680., 150.);
        let points = sample_arc(center, 25., std::f32::consts::TAU, 0., 12).unwrap();

        assert_eq!(points.len(), 13);
        for point in &points {
            assert_relative_eq!(point.distance(&center), 25., epsilon = 1e-3);
        }
    }

    #[test]
    fn arc_sampling_angles_linearly_spaced() {
        let center = Point::new(0., 0.);
        let points = sample_arc(center, 10., 0., std::f32::consts::PI, 4).unwrap();

        let expected = [0., 0.25, 0.5, 0.75, 1.];
        for (point, t) in points.iter().zip(expected) {
            let angle = std::f32::consts::PI * t;
            assert_relative_eq!(point.x(), 10. * angle.cos(), epsilon = 1e-3);
            assert_relative_eq!(point.y(), -10. * angle.sin(), epsilon = 1e-3);
        }
    }

    #[test]
    fn densify_respects_spacing_bound() {
        let waypoints = [
            Point::new(650., 400.),
            Point::new(750., 155.),
            Point::new(950., 120.),
        ];
        let points = densify(&waypoints, 20.).unwrap();

        for pair in points.windows(2) {
            assert!(pair[0].distance(&pair[1]) <= 20. + 1e-3);
        }
        assert_eq!(*points.last().unwrap(), waypoints[2]);
    }

    #[test]
    fn densify_keeps_sparse_waypoints() {
        let waypoints = [Point::new(0., 0.), Point::new(3., 4.)];
        let points = densify(&waypoints, 10.).unwrap();

        // a segment already inside the bound stays a single step
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], waypoints[1]);
    }

    #[test]
    fn densify_handles_degenerate_input() {
        assert!(densify(&[], 5.).unwrap().is_empty());

        let single = [Point::new(1., 2.)];
        assert_eq!(densify(&single, 5.).unwrap(), vec![single[0]]);
    }

    #[test]
    fn invalid_parameters_surface_as_typed_errors() {
        assert!(matches!(
            sample_arc(Point::new(0., 0.), 0., 0., 1., 4),
            Err(Error::NonPositive { .. })
        ));
        assert!(matches!(
            densify(&[Point::new(0., 0.)], -1.),
            Err(Error::NonPositive { .. })
        ));
    }
}
