//! 3D vector type used for particle positions.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

/// 3D vector. `y` is up; gravity pulls along `-y`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    pub fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }

    /// Unit vector pointing along gravity.
    pub fn down() -> Self { Vec3 { x: F::zero(), y: -F::one(), z: F::zero() } }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction, or zero when the length is near zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(F::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(F::one() / len)
        }
    }

    pub fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_pythagorean_triple() {
        let v = Vec3::new(2.0f32, 3.0, 6.0);
        assert!((v.length() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector() {
        let n = Vec3::<f32>::zero().normalize();
        assert_eq!(n, Vec3::zero());
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vec3::new(0.0f64, -4.0, 3.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n.y + 0.8).abs() < 1e-12);
    }

    #[test]
    fn lerp_midpoint() {
        let a = Vec3::new(-1.0f32, 0.0, 2.0);
        let b = Vec3::new(1.0f32, 4.0, 2.0);
        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 0.0).abs() < 1e-6);
        assert!((mid.y - 2.0).abs() < 1e-6);
        assert!((mid.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn down_points_along_negative_y() {
        let d = Vec3::<f32>::down();
        assert_eq!(d, Vec3::new(0.0, -1.0, 0.0));
    }
}
