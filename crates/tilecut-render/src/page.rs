//! 页面内容合成
//!
//! 对每个平铺块，在页面坐标（英寸，原点在页面左下角）下计算：
//! - 落在打印窗口内的图纸线段（仿射缩放 + 平移 + 裁剪）
//! - 45°对角配准网格：按全局坐标生成，相邻页物理叠放时网格对齐
//! - 平铺边界处的裁切十字标记
//! - 页标签 "(行, 列)"

use tilecut_core::drawing::Drawing;
use tilecut_core::layout::{PageTile, TilePlan};
use tilecut_core::math::{BoundingBox2, Point2, EPSILON};

/// 配准网格线间距（英寸，沿X方向度量）
pub const GRID_SPACING: f64 = 1.0;

/// 裁切标记臂长（英寸）
pub const CUT_MARK_HALF: f64 = 0.25;

/// 一张输出页的全部待画内容（页面坐标，英寸）
#[derive(Debug, Clone)]
pub struct PageContent {
    pub label: String,
    pub label_pos: Point2,
    /// 图纸线段
    pub segments: Vec<(Point2, Point2)>,
    /// 配准网格线
    pub grid_lines: Vec<(Point2, Point2)>,
    /// 裁切标记
    pub cut_marks: Vec<(Point2, Point2)>,
}

/// 页面合成器
///
/// 持有规划结果与图纸原点，按块产出 `PageContent`。
pub struct PageComposer<'a> {
    plan: &'a TilePlan,
    /// 源图纸包围盒最小角（源单位）
    origin: Point2,
    scale: f64,
}

impl<'a> PageComposer<'a> {
    pub fn new(plan: &'a TilePlan, origin: Point2, scale: f64) -> Self {
        Self {
            plan,
            origin,
            scale,
        }
    }

    /// 合成一个平铺块对应的页面内容
    pub fn compose(&self, drawing: &Drawing, tile: &PageTile) -> PageContent {
        let window = self.plan.page_window(tile);
        let mut content = PageContent {
            label: format!("({}, {})", tile.row, tile.col),
            label_pos: Point2::new(0.3, self.plan.page_height - 0.4),
            segments: Vec::new(),
            grid_lines: Vec::new(),
            cut_marks: Vec::new(),
        };

        for segment in drawing.segments() {
            let a = self.to_scaled(segment.start);
            let b = self.to_scaled(segment.end);
            Self::push_clipped(&window, self.plan.margin, a, b, &mut content.segments);
        }

        self.diagonal_grid(&window, &mut content.grid_lines);
        self.cut_marks(&window, &mut content.cut_marks);

        content
    }

    /// 源坐标 → 缩放后的世界坐标（原点移到包围盒最小角）
    fn to_scaled(&self, p: Point2) -> Point2 {
        Point2::new(
            (p.x - self.origin.x) * self.scale,
            (p.y - self.origin.y) * self.scale,
        )
    }

    /// 裁剪到窗口后转页面坐标并收集；完全在窗口外或退化为点的线段丢弃
    fn push_clipped(
        window: &BoundingBox2,
        margin: f64,
        a: Point2,
        b: Point2,
        out: &mut Vec<(Point2, Point2)>,
    ) {
        if let Some((a, b)) = window.clip_segment(a, b) {
            if (b - a).norm() > EPSILON {
                let to_page = |p: Point2| {
                    Point2::new(p.x - window.min.x + margin, p.y - window.min.y + margin)
                };
                out.push((to_page(a), to_page(b)));
            }
        }
    }

    /// 两组45°平行线，覆盖整个打印窗口
    ///
    /// 直线族按全局世界坐标参数化（x-y=k·s 与 x+y=k·s），
    /// 因此同一条线在相邻页的重叠区内位置一致。
    fn diagonal_grid(&self, window: &BoundingBox2, out: &mut Vec<(Point2, Point2)>) {
        let s = GRID_SPACING;
        let margin = self.plan.margin;

        // 斜率 +1：x - y = k·s
        let k_min = ((window.min.x - window.max.y) / s).floor() as i64;
        let k_max = ((window.max.x - window.min.y) / s).ceil() as i64;
        for k in k_min..=k_max {
            let c = k as f64 * s;
            let a = Point2::new(window.min.y + c, window.min.y);
            let b = Point2::new(window.max.y + c, window.max.y);
            Self::push_clipped(window, margin, a, b, out);
        }

        // 斜率 -1：x + y = k·s
        let k_min = ((window.min.x + window.min.y) / s).floor() as i64;
        let k_max = ((window.max.x + window.max.y) / s).ceil() as i64;
        for k in k_min..=k_max {
            let c = k as f64 * s;
            let a = Point2::new(c - window.min.y, window.min.y);
            let b = Point2::new(c - window.max.y, window.max.y);
            Self::push_clipped(window, margin, a, b, out);
        }
    }

    /// 平铺边界交点处的十字标记
    fn cut_marks(&self, window: &BoundingBox2, out: &mut Vec<(Point2, Point2)>) {
        let margin = self.plan.margin;
        for i in 0..=self.plan.cols {
            let x = i as f64 * self.plan.step_x;
            for j in 0..=self.plan.rows {
                let y = self.plan.scaled_height - j as f64 * self.plan.step_y;
                Self::push_clipped(
                    window,
                    margin,
                    Point2::new(x - CUT_MARK_HALF, y),
                    Point2::new(x + CUT_MARK_HALF, y),
                    out,
                );
                Self::push_clipped(
                    window,
                    margin,
                    Point2::new(x, y - CUT_MARK_HALF),
                    Point2::new(x, y + CUT_MARK_HALF),
                    out,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tilecut_core::geometry::{Geometry, Line};
    use tilecut_core::layout::{GridSpec, Orientation, PageSetup, PaperSize};

    // 可用区 10x10，边距 0.25，overlap 1 → 步长 9
    fn test_spec() -> GridSpec {
        let page = PageSetup {
            paper: PaperSize::Custom {
                width: 10.5,
                height: 10.5,
            },
            orientation: Orientation::Auto,
            margin: 0.25,
        };
        GridSpec::new(page, 1.0, 1.0).unwrap()
    }

    fn drawing_with_lines(lines: &[((f64, f64), (f64, f64))]) -> Drawing {
        let mut drawing = Drawing::new();
        for &((x1, y1), (x2, y2)) in lines {
            drawing.add_entity(Geometry::Line(Line::new(
                Point2::new(x1, y1),
                Point2::new(x2, y2),
            )));
        }
        drawing
    }

    /// 页面坐标映射回缩放后的世界坐标
    fn to_world(plan: &TilePlan, tile: &PageTile, p: Point2) -> Point2 {
        let window = plan.page_window(tile);
        Point2::new(
            p.x + window.min.x - plan.margin,
            p.y + window.min.y - plan.margin,
        )
    }

    #[test]
    fn test_segment_translated_to_page() {
        // 图纸 18x8 → 2 列 x 1 行
        let drawing = drawing_with_lines(&[((0.0, 0.0), (2.0, 2.0)), ((17.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        assert_eq!(plan.page_count(), 2);

        let composer = PageComposer::new(&plan, bounds.min, 1.0);
        let first = composer.compose(&drawing, &plan.tiles[0]);

        // 第二条线段在第一页窗口之外
        assert_eq!(first.segments.len(), 1);
        let (a, b) = first.segments[0];
        // 窗口底边 y = 8 - 10 = -2，因此页面 y = 世界 y + 2 + 边距
        assert!((a.x - 0.25).abs() < EPSILON);
        assert!((a.y - 2.25).abs() < EPSILON);
        assert!((b.x - 2.25).abs() < EPSILON);
        assert!((b.y - 4.25).abs() < EPSILON);
    }

    #[test]
    fn test_segment_clipped_at_window_edge() {
        let drawing = drawing_with_lines(&[((9.0, 4.0), (12.0, 4.0)), ((0.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        let composer = PageComposer::new(&plan, bounds.min, 1.0);

        let first = composer.compose(&drawing, &plan.tiles[0]);
        let horizontal = first
            .segments
            .iter()
            .find(|(a, b)| (a.y - b.y).abs() < EPSILON)
            .expect("horizontal segment missing");
        // 第一页窗口右边界 x = 10 → 页面 x = 10 + 0.25
        assert!((horizontal.1.x - 10.25).abs() < EPSILON);

        let second = composer.compose(&drawing, &plan.tiles[1]);
        let horizontal = second
            .segments
            .iter()
            .find(|(a, b)| (a.y - b.y).abs() < EPSILON)
            .expect("horizontal segment missing");
        // 第二页窗口从 x = 9 开始 → 线段起点落在页面左边距上
        assert!((horizontal.0.x - 0.25).abs() < EPSILON);
        assert!((horizontal.1.x - 3.25).abs() < EPSILON);
    }

    #[test]
    fn test_out_of_tile_segment_absent() {
        let drawing = drawing_with_lines(&[((15.0, 1.0), (17.0, 1.0)), ((0.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        let composer = PageComposer::new(&plan, bounds.min, 1.0);

        let first = composer.compose(&drawing, &plan.tiles[0]);
        for (a, b) in &first.segments {
            // 页面内容不超过可用区右边界
            assert!(a.x <= plan.usable_width + plan.margin + EPSILON);
            assert!(b.x <= plan.usable_width + plan.margin + EPSILON);
        }
        // 只有对角参考线被保留
        assert_eq!(first.segments.len(), 1);
    }

    /// 网格线所属直线族的参数：斜率+1 → x-y，斜率-1 → x+y
    fn grid_params(plan: &TilePlan, tile: &PageTile, content: &PageContent) -> BTreeSet<i64> {
        let mut params = BTreeSet::new();
        for (a, b) in &content.grid_lines {
            let wa = to_world(plan, tile, *a);
            let wb = to_world(plan, tile, *b);
            let d = wb - wa;
            let c = if d.x * d.y > 0.0 { wa.x - wa.y } else { wa.x + wa.y };
            params.insert((c / GRID_SPACING).round() as i64);
        }
        params
    }

    #[test]
    fn test_grid_aligns_across_adjacent_pages() {
        let drawing = drawing_with_lines(&[((0.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        let composer = PageComposer::new(&plan, bounds.min, 1.0);

        let first = composer.compose(&drawing, &plan.tiles[0]);
        let second = composer.compose(&drawing, &plan.tiles[1]);
        assert!(!first.grid_lines.is_empty());
        assert!(!second.grid_lines.is_empty());

        let shared: Vec<i64> = grid_params(&plan, &plan.tiles[0], &first)
            .intersection(&grid_params(&plan, &plan.tiles[1], &second))
            .copied()
            .collect();
        // 重叠区内的网格线在两页上都出现
        assert!(!shared.is_empty());
    }

    #[test]
    fn test_grid_endpoints_stay_on_their_line() {
        let drawing = drawing_with_lines(&[((0.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        let composer = PageComposer::new(&plan, bounds.min, 1.0);
        let content = composer.compose(&drawing, &plan.tiles[0]);

        for (a, b) in &content.grid_lines {
            let wa = to_world(&plan, &plan.tiles[0], *a);
            let wb = to_world(&plan, &plan.tiles[0], *b);
            let d = wb - wa;
            // 裁剪不会改变45°斜率
            assert!((d.x.abs() - d.y.abs()).abs() < 1e-6);
            let c = if d.x * d.y > 0.0 { wa.x - wa.y } else { wa.x + wa.y };
            assert!((c / GRID_SPACING - (c / GRID_SPACING).round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cut_marks_on_shared_boundary() {
        let drawing = drawing_with_lines(&[((0.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        let composer = PageComposer::new(&plan, bounds.min, 1.0);

        // 平铺边界 x = 9（世界坐标）两页都应有标记
        for tile in &plan.tiles {
            let content = composer.compose(&drawing, tile);
            let found = content.cut_marks.iter().any(|(a, b)| {
                let wa = to_world(&plan, tile, *a);
                let wb = to_world(&plan, tile, *b);
                (wa.x - 9.0).abs() < 1e-6 && (wb.x - 9.0).abs() < 1e-6
            });
            assert!(found, "cut mark missing on tile ({}, {})", tile.row, tile.col);
        }
    }

    #[test]
    fn test_page_label() {
        let drawing = drawing_with_lines(&[((0.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        let composer = PageComposer::new(&plan, bounds.min, 1.0);

        let second = composer.compose(&drawing, &plan.tiles[1]);
        assert_eq!(second.label, "(0, 1)");
        assert!((second.label_pos.x - 0.3).abs() < EPSILON);
        assert!((second.label_pos.y - (plan.page_height - 0.4)).abs() < EPSILON);
    }

    #[test]
    fn test_empty_drawing_composes_grid_only() {
        let drawing = drawing_with_lines(&[((0.0, 0.0), (18.0, 8.0))]);
        let bounds = drawing.bounds().unwrap();
        let plan = test_spec().plan(&bounds);
        let composer = PageComposer::new(&plan, bounds.min, 1.0);

        let empty = Drawing::new();
        let content = composer.compose(&empty, &plan.tiles[0]);
        assert!(content.segments.is_empty());
        assert!(!content.grid_lines.is_empty());
    }
}
