// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod ray;
mod scalar;

pub use ray::{Ray, BOUNCE_OFFSET};
pub use scalar::{
    almost_zero, almost_zero_eps, is_invalid, luminance, reflect, safe_normalize, safe_sqrt,
    ZERO_EPSILON,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_componentwise_product() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(b / a, Vec3::new(4.0, 2.5, 2.0));
    }
}
