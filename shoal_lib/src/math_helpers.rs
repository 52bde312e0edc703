use glam::Vec2;

use crate::options::WorldSize;

/// Guarded vector operations. A zero-length vector never gets normalized, it
/// stays zero instead of turning into NaN.
pub trait VecExt {
    fn safe_normalize(&self) -> Self;
    fn with_length(&self, length: f32) -> Self;
    fn limit(&self, max: f32) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn safe_normalize(&self) -> Self {
        let length = self.length();
        if length > 0. && length.is_finite() {
            *self / length
        } else {
            Vec2::ZERO
        }
    }

    #[inline]
    fn with_length(&self, length: f32) -> Self {
        self.safe_normalize() * length
    }

    #[inline]
    fn limit(&self, max: f32) -> Self {
        self.clamp_length_max(max)
    }
}

/// Wraps a single coordinate into [0, size), the world is a torus
#[inline]
pub fn wrap_component(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size {
        0.
    } else {
        wrapped
    }
}

pub fn wrap_position(position: Vec2, world: &WorldSize) -> Vec2 {
    Vec2::new(
        wrap_component(position.x, world.width),
        wrap_component(position.y, world.height),
    )
}

/// Angle of travel in radians, as the renderer expects it
#[inline]
pub fn heading(velocity: Vec2) -> f32 {
    velocity.y.atan2(velocity.x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;
    use rstest::rstest;

    use super::{heading, wrap_component, wrap_position, VecExt};
    use crate::options::WorldSize;

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-3_f32)
        };
    }

    #[test]
    fn zero_vector_stays_zero() {
        assert_eq!(Vec2::ZERO.safe_normalize(), Vec2::ZERO);
        assert_eq!(Vec2::ZERO.with_length(2.), Vec2::ZERO);
    }

    #[test]
    fn normalize_and_scale() {
        let v = Vec2::new(3., 4.).with_length(2.);
        assert_eqf32!(v.x, 1.2);
        assert_eqf32!(v.y, 1.6);
        assert_eqf32!(Vec2::new(30., 40.).limit(5.).length(), 5.);
        assert_eq!(Vec2::new(0.3, 0.4).limit(5.), Vec2::new(0.3, 0.4));
    }

    #[rstest]
    #[case(101., 1.)]
    #[case(-1., 99.)]
    #[case(100., 0.)]
    #[case(50., 50.)]
    #[case(-201., 99.)]
    fn wraps_around_torus(#[case] value: f32, #[case] expected: f32) {
        assert_eqf32!(wrap_component(value, 100.), expected);
    }

    #[test]
    fn tiny_negative_does_not_land_on_edge() {
        let wrapped = wrap_component(-1e-9, 100.);
        assert!(wrapped < 100.);
    }

    #[test]
    fn wraps_both_axes() {
        let world = WorldSize::new(800., 600.);
        let p = wrap_position(Vec2::new(801., -1.), &world);
        assert_eqf32!(p.x, 1.);
        assert_eqf32!(p.y, 599.);
    }

    #[test]
    fn heading_follows_velocity() {
        assert_eqf32!(heading(Vec2::new(0., 1.)), std::f32::consts::FRAC_PI_2);
        assert_eqf32!(heading(Vec2::new(-1., 0.)), std::f32::consts::PI);
    }
}
