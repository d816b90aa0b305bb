//! 分页布局引擎
//!
//! 把缩放后的图纸包围盒划分为一组互相重叠的页面平铺块（Tile），
//! 每块对应一张物理打印页。相邻块沿共享边重叠 `overlap`，
//! 便于打印后裁剪拼接。
//!
//! 单位约定：页面尺寸、边距、重叠均为英寸；`scale` 把源单位映射到英寸。

use crate::math::{BoundingBox2, Point2, EPSILON};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 布局配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("overlap must be a non-negative finite number, got {0}")]
    InvalidOverlap(f64),

    #[error("margin {margin} leaves no usable area on a {width} x {height} page")]
    InvalidMargin {
        margin: f64,
        width: f64,
        height: f64,
    },

    #[error("overlap {overlap} must be smaller than the usable page dimension {usable}")]
    OverlapTooLarge { overlap: f64, usable: f64 },
}

/// 纸张规格（宽、高为竖向尺寸，英寸）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    Letter,
    A4,
    Custom { width: f64, height: f64 },
}

impl PaperSize {
    /// 竖向（Portrait）尺寸 (宽, 高)
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::A4 => (8.27, 11.69),
            PaperSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// 页面方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Orientation {
    /// 按缩放后包围盒的长宽比自动选择
    #[default]
    Auto,
    Landscape,
    Portrait,
}

/// 页面设置：纸张、方向、边距
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub paper: PaperSize,
    pub orientation: Orientation,
    /// 页边距（英寸，四边相同）
    pub margin: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper: PaperSize::Letter,
            orientation: Orientation::Auto,
            margin: 0.25,
        }
    }
}

impl PageSetup {
    /// 解析出物理页面尺寸 (宽, 高)
    ///
    /// `landscape_hint` 只在 `Orientation::Auto` 时生效。
    pub fn resolve(&self, landscape_hint: bool) -> (f64, f64) {
        let (w, h) = self.paper.dimensions();
        let landscape = match self.orientation {
            Orientation::Auto => landscape_hint,
            Orientation::Landscape => true,
            Orientation::Portrait => false,
        };
        if landscape {
            (w.max(h), w.min(h))
        } else {
            (w.min(h), w.max(h))
        }
    }
}

/// 平铺网格配置：页面设置 + 缩放系数 + 重叠宽度
///
/// 构造时校验一次，之后不可变。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub page: PageSetup,
    /// 源单位到英寸的缩放系数
    pub scale: f64,
    /// 相邻块之间的重叠宽度（英寸）
    pub overlap: f64,
}

impl GridSpec {
    pub fn new(page: PageSetup, scale: f64, overlap: f64) -> Result<Self, ConfigError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        if !overlap.is_finite() || overlap < 0.0 {
            return Err(ConfigError::InvalidOverlap(overlap));
        }

        let (width, height) = page.paper.dimensions();
        let usable_min = width.min(height) - 2.0 * page.margin;
        if usable_min <= 0.0 {
            return Err(ConfigError::InvalidMargin {
                margin: page.margin,
                width,
                height,
            });
        }
        // 步长 usable - overlap 必须为正，否则平铺无法前进
        if overlap >= usable_min {
            return Err(ConfigError::OverlapTooLarge {
                overlap,
                usable: usable_min,
            });
        }

        Ok(Self {
            page,
            scale,
            overlap,
        })
    }

    /// 为给定源单位包围盒规划平铺
    pub fn plan(&self, bounds: &BoundingBox2) -> TilePlan {
        let scaled_width = bounds.width() * self.scale;
        let scaled_height = bounds.height() * self.scale;

        let (page_width, page_height) = self.page.resolve(scaled_width > scaled_height);
        let usable_width = page_width - 2.0 * self.page.margin;
        let usable_height = page_height - 2.0 * self.page.margin;
        let step_x = usable_width - self.overlap;
        let step_y = usable_height - self.overlap;

        let mut cols = (scaled_width / step_x).ceil().max(1.0) as usize;
        let mut rows = (scaled_height / step_y).ceil().max(1.0) as usize;

        // 尾列/尾行合并：最后一块的新鲜内容若完全落在前一块的
        // 重叠带内，则该块不会带来任何新内容，直接丢弃。
        if cols > 1 && scaled_width - (cols - 1) as f64 * step_x <= self.overlap + EPSILON {
            cols -= 1;
        }
        if rows > 1 && scaled_height - (rows - 1) as f64 * step_y <= self.overlap + EPSILON {
            rows -= 1;
        }

        // 行主序：行0在最上方，自上而下、自左向右
        let mut tiles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let y1 = scaled_height - row as f64 * step_y;
            let y0 = (y1 - usable_height).max(0.0);
            for col in 0..cols {
                let x0 = col as f64 * step_x;
                let x1 = (x0 + usable_width).min(scaled_width);
                tiles.push(PageTile {
                    row,
                    col,
                    x0,
                    y0,
                    x1,
                    y1,
                });
            }
        }

        TilePlan {
            page_width,
            page_height,
            margin: self.page.margin,
            usable_width,
            usable_height,
            step_x,
            step_y,
            rows,
            cols,
            scaled_width,
            scaled_height,
            tiles,
        }
    }
}

/// 一个页面平铺块
///
/// 坐标为缩放后的输出单位（英寸），原点在缩放包围盒的最小角。
/// 块矩形已包含重叠带；尾边裁剪到图纸范围。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageTile {
    pub row: usize,
    pub col: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PageTile {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// 平铺规划结果：解析后的页面尺寸 + 有序的平铺块序列
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlan {
    /// 物理页面尺寸（英寸，方向已解析）
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// 可打印区域尺寸
    pub usable_width: f64,
    pub usable_height: f64,
    /// 相邻块原点间距
    pub step_x: f64,
    pub step_y: f64,
    pub rows: usize,
    pub cols: usize,
    /// 缩放后的图纸尺寸
    pub scaled_width: f64,
    pub scaled_height: f64,
    /// 行主序的平铺块
    pub tiles: Vec<PageTile>,
}

impl TilePlan {
    pub fn page_count(&self) -> usize {
        self.tiles.len()
    }

    /// 某块对应的整页打印窗口（缩放后的世界坐标）
    ///
    /// 锚定在块的左上原点，覆盖整个可打印区域；块矩形与它
    /// 只在尾边裁剪处不同。
    pub fn page_window(&self, tile: &PageTile) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(tile.x0, tile.y1 - self.usable_height),
            Point2::new(tile.x0 + self.usable_width, tile.y1),
        )
    }
}
