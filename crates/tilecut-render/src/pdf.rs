//! PDF输出
//!
//! 每个平铺块对应一页。配准网格浅灰，图纸内容与裁切标记黑色，
//! 页标签使用内置Helvetica Bold。

use crate::error::OutputError;
use crate::page::PageContent;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tilecut_core::math::Point2;
use tracing::info;

const IN_TO_MM: f64 = 25.4;

/// 描边宽度（pt），约0.5mm
const LINE_WIDTH_PT: f64 = 1.42;

/// 配准网格灰度
const GRID_GRAY: f64 = 200.0 / 255.0;

const LABEL_FONT_SIZE: f64 = 8.0;

/// PDF导出器
pub struct PdfExporter {
    doc: PdfDocumentReference,
    font: Option<IndirectFontRef>,
    /// 页面尺寸（英寸）
    page_width: f64,
    page_height: f64,
    page_count: usize,
}

impl PdfExporter {
    pub fn new(title: &str, page_width: f64, page_height: f64) -> Self {
        let doc = PdfDocument::empty(title);
        let font = doc.add_builtin_font(BuiltinFont::HelveticaBold).ok();
        Self {
            doc,
            font,
            page_width,
            page_height,
            page_count: 0,
        }
    }

    /// 追加一页并画出全部内容
    pub fn add_page(&mut self, content: &PageContent) {
        let (page_index, layer_index) = self.doc.add_page(
            Mm(self.page_width * IN_TO_MM),
            Mm(self.page_height * IN_TO_MM),
            "Layer 1",
        );
        let layer = self.doc.get_page(page_index).get_layer(layer_index);
        layer.set_outline_thickness(LINE_WIDTH_PT);

        // 先画网格，避免盖住图纸内容
        layer.set_outline_color(Color::Rgb(Rgb::new(GRID_GRAY, GRID_GRAY, GRID_GRAY, None)));
        for (a, b) in &content.grid_lines {
            Self::stroke_segment(&layer, *a, *b);
        }

        layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        for (a, b) in &content.segments {
            Self::stroke_segment(&layer, *a, *b);
        }
        for (a, b) in &content.cut_marks {
            Self::stroke_segment(&layer, *a, *b);
        }

        if let Some(font) = &self.font {
            layer.begin_text_section();
            layer.set_font(font, LABEL_FONT_SIZE);
            layer.set_text_cursor(
                Mm(content.label_pos.x * IN_TO_MM),
                Mm(content.label_pos.y * IN_TO_MM),
            );
            layer.write_text(&content.label, font);
            layer.end_text_section();
        }

        self.page_count += 1;
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn stroke_segment(layer: &PdfLayerReference, a: Point2, b: Point2) {
        let line = Line {
            points: vec![
                (Point::new(Mm(a.x * IN_TO_MM), Mm(a.y * IN_TO_MM)), false),
                (Point::new(Mm(b.x * IN_TO_MM), Mm(b.y * IN_TO_MM)), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        };
        layer.add_shape(line);
    }

    /// 写出PDF文件
    ///
    /// 失败时删除写了一半的文件，不留下截断的产物。
    pub fn save(self, path: &Path) -> Result<(), OutputError> {
        let pages = self.page_count;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        if let Err(e) = self.doc.save(&mut writer) {
            drop(writer);
            std::fs::remove_file(path).ok();
            return Err(OutputError::Pdf(e.to_string()));
        }
        info!("wrote {} pages to {}", pages, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_content() -> PageContent {
        PageContent {
            label: "(0, 0)".to_string(),
            label_pos: Point2::new(0.3, 8.1),
            segments: vec![(Point2::new(1.0, 1.0), Point2::new(5.0, 3.0))],
            grid_lines: vec![(Point2::new(0.25, 0.25), Point2::new(2.25, 2.25))],
            cut_marks: vec![(Point2::new(1.0, 0.75), Point2::new(1.0, 1.25))],
        }
    }

    #[test]
    fn test_export_writes_pdf() {
        let file_path = std::env::temp_dir().join("tilecut_test_export.pdf");

        let mut exporter = PdfExporter::new("TileCut Test", 11.0, 8.5);
        exporter.add_page(&sample_content());
        exporter.add_page(&sample_content());
        assert_eq!(exporter.page_count(), 2);

        exporter.save(&file_path).expect("Failed to save");

        let bytes = std::fs::read(&file_path).expect("Failed to read back");
        assert!(bytes.starts_with(b"%PDF"));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_save_to_invalid_path() {
        let mut exporter = PdfExporter::new("TileCut Test", 11.0, 8.5);
        exporter.add_page(&sample_content());
        let result = exporter.save(Path::new("/nonexistent-dir/out.pdf"));
        assert!(result.is_err());
    }
}
