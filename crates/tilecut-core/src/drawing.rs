//! 图纸数据模型
//!
//! 加载后不可变的实体集合，包围盒只在此派生一次。

use crate::geometry::{Geometry, Line};
use crate::math::BoundingBox2;
use serde::{Deserialize, Serialize};

/// 一张2D图纸：有序的实体集合（源单位）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Drawing {
    entities: Vec<Geometry>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Geometry) {
        self.entities.push(entity);
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Geometry> {
        self.entities.iter()
    }

    /// 所有实体展开后的线段
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.entities.iter().flat_map(|g| g.segments())
    }

    /// 整张图纸的包围盒
    ///
    /// 没有任何可度量几何时返回 None。
    pub fn bounds(&self) -> Option<BoundingBox2> {
        let bbox = self
            .entities
            .iter()
            .fold(BoundingBox2::empty(), |acc, g| acc.union(&g.bounding_box()));
        if bbox.is_empty() {
            None
        } else {
            Some(bbox)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;
    use crate::math::Point2;

    #[test]
    fn test_bounds_over_entities() {
        let mut drawing = Drawing::new();
        drawing.add_entity(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 5.0),
        )));
        drawing.add_entity(Geometry::Polyline(Polyline::from_points(
            [Point2::new(-3.0, 2.0), Point2::new(4.0, 8.0)],
            false,
        )));

        let bbox = drawing.bounds().unwrap();
        assert_eq!(bbox.min, Point2::new(-3.0, 0.0));
        assert_eq!(bbox.max, Point2::new(10.0, 8.0));
    }

    #[test]
    fn test_empty_drawing_has_no_bounds() {
        let drawing = Drawing::new();
        assert!(drawing.is_empty());
        assert!(drawing.bounds().is_none());
    }

    #[test]
    fn test_segments_flatten_polylines() {
        let mut drawing = Drawing::new();
        drawing.add_entity(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        )));
        drawing.add_entity(Geometry::Polyline(Polyline::from_points(
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 0.0),
            ],
            true,
        )));

        assert_eq!(drawing.entities().count(), 2);
        assert_eq!(drawing.segments().count(), 4);
    }
}
