use image::GrayImage;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Fixed sheet geometry, in points with the origin at the bottom-left of the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub columns: usize,
    pub label_width: f32,
    pub label_height: f32,
    pub top_margin: f32,     // grid origin, measured down from the page top
    pub bottom_reserve: f32, // only used to size rows per page
}

impl Default for SheetLayout {
    /// A4 portrait, three 60 x 18 mm labels per row.
    fn default() -> Self {
        Self {
            page_width: 210.0 * MM,
            page_height: 297.0 * MM,
            columns: 3,
            label_width: 60.0 * MM,
            label_height: 18.0 * MM,
            top_margin: 40.0 * MM,
            bottom_reserve: 20.0 * MM,
        }
    }
}

impl SheetLayout {
    pub fn rows_per_page(&self) -> usize {
        if self.label_height <= 0.0 {
            return 0;
        }
        let rows = ((self.page_height - self.bottom_reserve) / self.label_height).floor();
        if rows > 0.0 { rows as usize } else { 0 }
    }

    pub fn cells_per_page(&self) -> usize {
        self.columns * self.rows_per_page()
    }

    /// Left offset that centers the grid horizontally.
    pub fn x_margin(&self) -> f32 {
        (self.page_width - self.columns as f32 * self.label_width) / 2.0
    }

    pub fn y_start(&self) -> f32 {
        self.page_height - self.top_margin
    }
}

/// Page and cell assigned to one label, plus the bottom-left corner of that cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
}

/// Barcode rasterization parameters. Lengths in millimetres, font size in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub module_height: f32,
    pub module_width: f32,
    pub font_size: f32,
    pub text_distance: f32,
    pub quiet_zone: f32,
    pub dpi: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_height: 2.8,
            module_width: 0.2,
            font_size: 6.0,
            text_distance: 2.25,
            quiet_zone: 2.0,
            dpi: 300,
        }
    }
}

/// A rendered label: the bar raster plus the caption printed underneath it.
///
/// The raster includes a blank band below the bars; the caption geometry is
/// expressed as fractions of the raster height so it scales with the image
/// when the label is stretched into its cell.
#[derive(Clone, Debug)]
pub struct LabelImage {
    pub identifier: String,
    pub pixels: GrayImage,
    pub caption_baseline: f32, // from the bottom edge
    pub caption_size: f32,
}

impl LabelImage {
    pub fn pixel_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Largest range a single run accepts; every label is held in memory until the PDF is written.
pub const MAX_LABELS: usize = 10_000;

/// Everything a single sheet run needs. `Default` gives the fixed production values.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetConfig {
    pub prefix: String,
    pub digits: usize,
    pub max_labels: usize,
    pub layout: SheetLayout,
    pub render: RenderOptions,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            prefix: "UEPL-SPD-".to_string(),
            digits: 8,
            max_labels: MAX_LABELS,
            layout: SheetLayout::default(),
            render: RenderOptions::default(),
        }
    }
}
