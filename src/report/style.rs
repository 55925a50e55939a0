//! Named cell styles of the report.
//!
//! Styles are plain constant records so that two cells share a look exactly
//! when their styles compare equal. They become `rust_xlsxwriter` formats only
//! when the workbook is written.
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, FormatPattern};

/// Fill of the title and the header row.
pub const LIGHT_GRAY: u32 = 0xD9D9D6;

const BLACK: u32 = 0x000000;

/// Horizontal alignment of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Align {
    Center,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<u8>,
    pub font_color: Option<u32>,
    pub fill_color: Option<u32>,
    pub horizontal: Option<Align>,
    pub vertically_centered: bool,
    /// Thin border on all four sides
    pub thin_border: bool,
    pub num_format: Option<&'static str>,
}

/// No styling at all (metadata row).
pub const PLAIN: CellStyle = CellStyle {
    bold: false,
    font_size: None,
    font_color: None,
    fill_color: None,
    horizontal: None,
    vertically_centered: false,
    thin_border: false,
    num_format: None,
};

/// Merged title over A1:D1.
pub const TITLE: CellStyle = CellStyle {
    bold: true,
    font_size: Some(16),
    font_color: Some(BLACK),
    fill_color: Some(LIGHT_GRAY),
    horizontal: Some(Align::Center),
    vertically_centered: true,
    ..PLAIN
};

/// Column labels of row 3.
pub const HEADER: CellStyle = CellStyle {
    bold: true,
    font_color: Some(BLACK),
    fill_color: Some(LIGHT_GRAY),
    horizontal: Some(Align::Center),
    vertically_centered: true,
    thin_border: true,
    ..PLAIN
};

/// Data cells.
pub const BODY: CellStyle = CellStyle {
    horizontal: Some(Align::Center),
    vertically_centered: true,
    thin_border: true,
    ..PLAIN
};

/// Data cells holding a date-time serial.
pub const BODY_DATETIME: CellStyle = CellStyle {
    num_format: Some("yyyy-mm-dd hh:mm:ss"),
    ..BODY
};

/// Data cells holding a time-of-day serial.
pub const BODY_TIME: CellStyle = CellStyle {
    num_format: Some("hh:mm:ss"),
    ..BODY
};

/// `TOTAL` label of the last row.
pub const TOTAL_LABEL: CellStyle = CellStyle {
    horizontal: Some(Align::Right),
    vertically_centered: true,
    thin_border: true,
    ..PLAIN
};

/// Sum formula of the last row.
pub const TOTAL_VALUE: CellStyle = CellStyle {
    bold: true,
    horizontal: Some(Align::Center),
    vertically_centered: true,
    thin_border: true,
    ..PLAIN
};

impl CellStyle {
    pub fn to_format(&self) -> Format {
        let mut format = Format::new();
        if self.bold {
            format = format.set_bold();
        }
        if let Some(size) = self.font_size {
            format = format.set_font_size(size);
        }
        if let Some(color) = self.font_color {
            format = format.set_font_color(color);
        }
        if let Some(color) = self.fill_color {
            format = format
                .set_background_color(color)
                .set_pattern(FormatPattern::Solid);
        }
        match self.horizontal {
            Some(Align::Center) => format = format.set_align(FormatAlign::Center),
            Some(Align::Right) => format = format.set_align(FormatAlign::Right),
            None => (),
        }
        if self.vertically_centered {
            format = format.set_align(FormatAlign::VerticalCenter);
        }
        if self.thin_border {
            format = format.set_border(FormatBorder::Thin);
        }
        if let Some(num_format) = self.num_format {
            format = format.set_num_format(num_format);
        }
        format
    }
}
