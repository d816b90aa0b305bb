//! TileCut 文件格式处理
//!
//! 支持：
//! - `.dxf` 导入（LINE / LWPOLYLINE / POLYLINE）

pub mod dxf_io;
pub mod error;

pub use error::FileError;
