//! DXF文件导入
//!
//! 读取AutoCAD DXF格式，只保留能展开为直线段的实体；
//! 其余类型静默跳过（对本工具的用途可接受）。

use crate::error::FileError;
use std::path::Path;
use tilecut_core::drawing::Drawing;
use tilecut_core::geometry::{Geometry, Line, Polyline};
use tilecut_core::math::Point2;
use tracing::{info, warn};

/// 从DXF文件导入
pub fn import(path: &Path) -> Result<Drawing, FileError> {
    let dxf_drawing =
        dxf::Drawing::load_file(path).map_err(|e| FileError::Dxf(e.to_string()))?;

    let mut drawing = Drawing::new();
    let mut skipped = 0usize;

    for entity in dxf_drawing.entities() {
        match convert_dxf_entity(entity) {
            Some(geometry) => drawing.add_entity(geometry),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("skipped {} unsupported DXF entities", skipped);
    }
    info!(
        entities = drawing.entity_count(),
        "imported DXF: {}",
        path.display()
    );

    Ok(drawing)
}

/// 将DXF实体转换为TileCut几何
fn convert_dxf_entity(entity: &dxf::entities::Entity) -> Option<Geometry> {
    match &entity.specific {
        dxf::entities::EntityType::Line(line) => {
            let start = Point2::new(line.p1.x, line.p1.y);
            let end = Point2::new(line.p2.x, line.p2.y);
            Some(Geometry::Line(Line::new(start, end)))
        }

        dxf::entities::EntityType::LwPolyline(lwpoly) => {
            // 顶点的 bulge 被忽略，弧段按直线连接
            let vertices: Vec<Point2> = lwpoly
                .vertices
                .iter()
                .map(|v| Point2::new(v.x, v.y))
                .collect();
            Some(Geometry::Polyline(Polyline::new(
                vertices,
                lwpoly.is_closed(),
            )))
        }

        dxf::entities::EntityType::Polyline(poly) => {
            let vertices: Vec<Point2> = poly
                .vertices()
                .map(|v| Point2::new(v.location.x, v.location.y))
                .collect();
            Some(Geometry::Polyline(Polyline::new(vertices, poly.is_closed())))
        }

        _ => None,
    }
}
