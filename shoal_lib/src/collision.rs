use glam::Vec2;

/// Collision shape used for overlap tests against the predator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    Circle { center: Vec2, radius: f32 },
    /// axis aligned bounding box
    Rect { min: Vec2, max: Vec2 },
}

impl Extent {
    pub fn rect_around(center: Vec2, half_size: Vec2) -> Self {
        let half_size = half_size.abs();
        Extent::Rect {
            min: center - half_size,
            max: center + half_size,
        }
    }

    pub fn overlaps(&self, other: &Extent) -> bool {
        match (*self, *other) {
            (
                Extent::Circle { center: c1, radius: r1 },
                Extent::Circle { center: c2, radius: r2 },
            ) => c1.distance_squared(c2) <= (r1 + r2).powi(2),
            (Extent::Rect { min: min1, max: max1 }, Extent::Rect { min: min2, max: max2 }) => {
                min1.x <= max2.x && max1.x >= min2.x && min1.y <= max2.y && max1.y >= min2.y
            }
            (Extent::Circle { center, radius }, Extent::Rect { min, max })
            | (Extent::Rect { min, max }, Extent::Circle { center, radius }) => {
                // closest point of the box to the circle's center
                let closest = center.max(min).min(max);
                closest.distance_squared(center) <= radius.powi(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Extent;

    fn circle(x: f32, y: f32, radius: f32) -> Extent {
        Extent::Circle { center: Vec2::new(x, y), radius }
    }

    #[test]
    fn circles() {
        assert!(circle(0., 0., 5.).overlaps(&circle(9., 0., 5.)));
        assert!(!circle(0., 0., 5.).overlaps(&circle(11., 0., 5.)));
    }

    #[test]
    fn rects() {
        let a = Extent::rect_around(Vec2::ZERO, Vec2::new(10., 5.));
        let b = Extent::rect_around(Vec2::new(15., 0.), Vec2::new(6., 6.));
        let c = Extent::rect_around(Vec2::new(0., 20.), Vec2::new(6., 6.));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn circle_against_rect_uses_closest_point() {
        let rect = Extent::rect_around(Vec2::ZERO, Vec2::new(10., 10.));
        // next to a face
        assert!(circle(14., 0., 5.).overlaps(&rect));
        assert!(rect.overlaps(&circle(14., 0., 5.)));
        // diagonal off the corner, 5 * sqrt(2) > 5
        assert!(!circle(15., 15., 5.).overlaps(&rect));
        // fully inside
        assert!(circle(0., 0., 1.).overlaps(&rect));
    }
}
