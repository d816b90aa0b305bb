//! TileCut 分页渲染
//!
//! 分两层：
//! - `page`: 纯计算，把一个平铺块变成页面坐标下的待画内容
//! - `pdf`: 把页面内容写入PDF（printpdf）

pub mod error;
pub mod page;
pub mod pdf;

pub use error::OutputError;
pub use page::{PageComposer, PageContent};
pub use pdf::PdfExporter;
