use barcoders::sym::code128::Code128;
use image::{GrayImage, Luma};

use crate::error::Error;
use crate::model::{LabelImage, RenderOptions};

/// Code set B start marker understood by `barcoders`.
const CODE_SET_B: char = '\u{0181}';

/// Blank margin above the bars and below the caption.
const VERTICAL_MARGIN_MM: f32 = 1.0;

/// Turns one identifier into a label image.
pub trait LabelRenderer {
    fn render(&self, identifier: &str, options: &RenderOptions) -> Result<LabelImage, Error>;
}

/// Code 128 (code set B) renderer producing an in-memory grayscale raster.
#[derive(Clone, Copy, Debug, Default)]
pub struct Code128Renderer;

impl LabelRenderer for Code128Renderer {
    fn render(&self, identifier: &str, options: &RenderOptions) -> Result<LabelImage, Error> {
        let modules = encode_modules(identifier)?;
        let label = rasterize(identifier, &modules, options);
        log::debug!(
            "Rendered {identifier}: {} modules, {}x{} px",
            modules.len(),
            label.pixel_width(),
            label.pixel_height()
        );
        Ok(label)
    }
}

/// Encode to a module sequence (1 = bar, 0 = space), start and stop patterns included.
fn encode_modules(identifier: &str) -> Result<Vec<u8>, Error> {
    let render_err = |reason: String| Error::Render {
        identifier: identifier.to_string(),
        reason,
    };
    if identifier.is_empty() {
        return Err(render_err("nothing to encode".into()));
    }
    if let Some(ch) = identifier.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(render_err(format!(
            "character {ch:?} is not encodable in Code 128 set B"
        )));
    }
    let symbol = Code128::new(format!("{CODE_SET_B}{identifier}"))
        .map_err(|e| render_err(e.to_string()))?;
    Ok(symbol.encode())
}

fn mm_to_px(mm: f32, dpi: u32) -> u32 {
    (mm * dpi as f32 / 25.4).round().max(0.0) as u32
}

fn rasterize(identifier: &str, modules: &[u8], options: &RenderOptions) -> LabelImage {
    let dpi = options.dpi.max(1);
    let module_px = mm_to_px(options.module_width, dpi).max(1);
    let quiet_px = mm_to_px(options.quiet_zone, dpi);
    let bars_px = mm_to_px(options.module_height, dpi).max(1);
    let distance_px = mm_to_px(options.text_distance, dpi);
    let font_px = (options.font_size * dpi as f32 / 72.0).round().max(0.0) as u32;
    let margin_px = mm_to_px(VERTICAL_MARGIN_MM, dpi);

    let width = 2 * quiet_px + modules.len() as u32 * module_px;
    let height = margin_px + bars_px + distance_px + font_px + margin_px;

    let mut img = GrayImage::from_pixel(width, height, Luma([255u8]));
    for (i, module) in modules.iter().enumerate() {
        if *module != 1 {
            continue;
        }
        let x0 = quiet_px + i as u32 * module_px;
        for x in x0..x0 + module_px {
            for y in margin_px..margin_px + bars_px {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }

    let h = height as f32;
    LabelImage {
        identifier: identifier.to_string(),
        pixels: img,
        caption_baseline: margin_px as f32 / h,
        caption_size: font_px as f32 / h,
    }
}

impl LabelImage {
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        let mut buf = std::io::Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| Error::Render {
                identifier: self.identifier.clone(),
                reason: format!("PNG encoding failed: {e}"),
            })?;
        Ok(buf.into_inner())
    }
}
