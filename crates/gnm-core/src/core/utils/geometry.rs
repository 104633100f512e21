use nalgebra::{Point3, Vector3};

pub fn squared_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm_squared()
}

/// Unweighted mean of a set of points.
///
/// Returns `None` for an empty set or when the mean is not finite.
pub fn centroid<'a, I>(points: I) -> Option<Point3<f64>>
where
    I: IntoIterator<Item = &'a Point3<f64>>,
{
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::zeros(), 0usize), |(sum, count), p| {
            (sum + p.coords, count + 1)
        });
    if count == 0 {
        return None;
    }
    let mean = Point3::from(sum / count as f64);
    is_finite_point(&mean).then_some(mean)
}

pub fn is_finite_point(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_matches_pythagoras() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert_eq!(squared_distance(&a, &b), 25.0);
        assert_eq!(squared_distance(&b, &a), 25.0);
    }

    #[test]
    fn centroid_is_unweighted_mean() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, -6.0)];
        assert_eq!(centroid(&points), Some(Point3::new(1.0, 2.0, -3.0)));
    }

    #[test]
    fn centroid_of_empty_set_is_none() {
        let points: [Point3<f64>; 0] = [];
        assert_eq!(centroid(&points), None);
    }

    #[test]
    fn centroid_rejects_non_finite_input() {
        let points = [Point3::new(f64::NAN, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
        assert_eq!(centroid(&points), None);
    }
}
