//! 几何图元定义
//!
//! 支持的基本图元：
//! - 线段 (Line)
//! - 多段线 (Polyline)
//!
//! 渲染管线只处理直线段，多段线在消费前爆炸为独立线段。

use crate::math::{BoundingBox2, Point2};
use serde::{Deserialize, Serialize};

/// 几何类型枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Polyline(Polyline),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Line(l) => l.bounding_box(),
            Geometry::Polyline(pl) => pl.bounding_box(),
        }
    }

    /// 展开为独立线段
    pub fn segments(&self) -> Vec<Line> {
        match self {
            Geometry::Line(l) => vec![l.clone()],
            Geometry::Polyline(pl) => pl.explode(),
        }
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 多段线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point2>,
    /// 是否闭合
    pub closed: bool,
}

impl Polyline {
    pub fn new(vertices: Vec<Point2>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// 从点列表创建
    pub fn from_points(points: impl IntoIterator<Item = Point2>, closed: bool) -> Self {
        Self {
            vertices: points.into_iter().collect(),
            closed,
        }
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            return 0;
        }
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// 计算总长度
    pub fn length(&self) -> f64 {
        let mut total = 0.0;
        for i in 0..self.segment_count() {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % self.vertices.len()];
            total += (v2 - v1).norm();
        }
        total
    }

    /// 爆炸为独立的线段
    pub fn explode(&self) -> Vec<Line> {
        if self.vertices.len() < 2 {
            return vec![];
        }

        let mut result = Vec::with_capacity(self.segment_count());
        for i in 0..self.segment_count() {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % self.vertices.len()];
            result.push(Line::new(v1, v2));
        }
        result
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(self.vertices.iter().copied())
    }
}
