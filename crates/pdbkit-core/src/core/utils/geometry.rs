use nalgebra::{Point3, Vector3};

/// Unweighted geometric center of a set of points, or `None` for an empty set.
pub fn calculate_centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Some(Point3::from(sum / points.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_empty_set_is_none() {
        assert_eq!(calculate_centroid(&[]), None);
    }

    #[test]
    fn centroid_averages_coordinates() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, -3.0),
        ];
        let centroid = calculate_centroid(&points).unwrap();
        assert!((centroid - Point3::new(1.0, 1.0, -1.0)).norm() < 1e-12);
    }
}
