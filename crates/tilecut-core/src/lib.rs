//! TileCut 核心引擎
//!
//! 提供几何图元、图纸数据模型和分页平铺布局计算。
//!
//! # 架构设计
//!
//! 管线分三步：
//! - `Drawing`: 加载后不可变的实体集合，派生一次包围盒
//! - `GridSpec::plan`: 把缩放后的包围盒划分为重叠的页面平铺块
//! - 渲染端按块消费（见 tilecut-render）
//!
//! # 示例
//!
//! ```rust
//! use tilecut_core::prelude::*;
//!
//! let spec = GridSpec::new(PageSetup::default(), 2.5, 0.5).unwrap();
//! let bounds = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(20.0, 10.0));
//! let plan = spec.plan(&bounds);
//! println!("Pages: {}", plan.page_count());
//! ```

pub mod drawing;
pub mod geometry;
pub mod layout;
pub mod math;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::drawing::Drawing;
    pub use crate::geometry::{Geometry, Line, Polyline};
    pub use crate::layout::{
        ConfigError, GridSpec, Orientation, PageSetup, PageTile, PaperSize, TilePlan,
    };
    pub use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
}
