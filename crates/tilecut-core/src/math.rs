//! 基础数学类型
//!
//! 基于 nalgebra 的2D点/向量别名，以及轴对齐包围盒。

use serde::{Deserialize, Serialize};

/// 浮点比较容差
pub const EPSILON: f64 = 1e-9;

/// 2D点（f64）
pub type Point2 = nalgebra::Point2<f64>;

/// 2D向量（f64）
pub type Vector2 = nalgebra::Vector2<f64>;

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 空包围盒（反向无穷区间，任何 expand 都会覆盖它）
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// 是否为空（尚未包含任何点）
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// 由一组点构建
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(&point);
        }
        bbox
    }

    /// 扩展包围盒以包含给定点
    pub fn expand_to_include(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// 两个包围盒的并集
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// 检查点是否在包围盒内（含边界）
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// 检查两个包围盒是否相交
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// 将线段裁剪到包围盒内（Liang-Barsky）
    ///
    /// 返回裁剪后的两个端点；线段完全在盒外时返回 None。
    pub fn clip_segment(&self, a: Point2, b: Point2) -> Option<(Point2, Point2)> {
        let d = b - a;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        let checks = [
            (-d.x, a.x - self.min.x),
            (d.x, self.max.x - a.x),
            (-d.y, a.y - self.min.y),
            (d.y, self.max.y - a.y),
        ];

        for (p, q) in checks {
            if p.abs() < EPSILON {
                // 与该边界平行：q < 0 表示整条线段在盒外
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    if r > t1 {
                        return None;
                    }
                    if r > t0 {
                        t0 = r;
                    }
                } else {
                    if r < t0 {
                        return None;
                    }
                    if r < t1 {
                        t1 = r;
                    }
                }
            }
        }

        Some((a + d * t0, a + d * t1))
    }
}
