//! TileCut 命令行入口
//!
//! 把DXF图纸按比例缩放后平铺到多张打印页上，输出带配准网格的PDF。

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tilecut_core::layout::{GridSpec, PageSetup};
use tilecut_render::{PageComposer, PdfExporter};

/// 把DXF矢量图纸缩放并平铺为多页打印PDF
#[derive(Parser, Debug)]
#[command(
    name = "tilecut",
    version,
    about = "Convert a DXF drawing into a tiled, print-ready PDF"
)]
struct Cli {
    /// 输入DXF文件
    dxf: PathBuf,

    /// 输出PDF路径
    #[arg(long)]
    pdf: PathBuf,

    /// 缩放系数（源单位 → 英寸），必须为正
    #[arg(long)]
    scale: f64,

    /// 相邻页之间的重叠宽度（英寸）
    #[arg(long, default_value_t = 0.5)]
    overlap: f64,
}

fn main() -> Result<()> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let spec = GridSpec::new(PageSetup::default(), cli.scale, cli.overlap)?;

    let drawing = tilecut_file::dxf_io::import(&cli.dxf)?;
    let Some(bounds) = drawing.bounds() else {
        warn!("drawing has no drawable entities, nothing to print");
        return Ok(());
    };

    info!(
        "bounding box: ({:.3}, {:.3}) - ({:.3}, {:.3})",
        bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
    );

    let plan = spec.plan(&bounds);
    info!(
        "page size: {} x {} in, cutting into {} x {} pages",
        plan.page_width, plan.page_height, plan.cols, plan.rows
    );

    let composer = PageComposer::new(&plan, bounds.min, spec.scale);
    let mut exporter = PdfExporter::new("TileCut", plan.page_width, plan.page_height);
    for tile in &plan.tiles {
        exporter.add_page(&composer.compose(&drawing, tile));
    }
    exporter.save(&cli.pdf)?;

    Ok(())
}
