mod barcode;
mod codes;
mod error;
mod model;
mod pdf;

pub use barcode::{Code128Renderer, LabelRenderer};
pub use codes::{format_identifier, identifiers};
pub use error::Error;
pub use model::{
    LabelImage, MAX_LABELS, MM, Placement, RenderOptions, SheetConfig, SheetLayout,
};
pub use pdf::PdfSurface;
pub use pdf::layout::{DrawingSurface, Grid, page_count, paginate, placement};

use std::path::Path;
use std::time::Instant;

/// Output of one run: the rendered labels and the finished PDF.
pub struct Sheet {
    pub labels: Vec<LabelImage>,
    pub pdf: Vec<u8>,
}

/// One sheet run: a config record plus the renderer used for every label.
pub struct SheetGenerator<R = Code128Renderer> {
    config: SheetConfig,
    renderer: R,
}

impl SheetGenerator<Code128Renderer> {
    pub fn new(config: SheetConfig) -> Self {
        Self::with_renderer(config, Code128Renderer)
    }
}

impl<R: LabelRenderer> SheetGenerator<R> {
    pub fn with_renderer(config: SheetConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn grid(&self) -> Result<Grid, Error> {
        Grid::new(self.config.layout)
    }

    pub fn identifiers(&self, start: u64, end: u64) -> Result<Vec<String>, Error> {
        identifiers(start, end, &self.config)
    }

    /// Render every identifier, stopping at the first failure.
    pub fn render_labels(&self, ids: &[String]) -> Result<Vec<LabelImage>, Error> {
        ids.iter()
            .map(|id| self.renderer.render(id, &self.config.render))
            .collect()
    }

    /// Lay `labels` out onto `surface` and finalize it.
    pub fn assemble_onto<S: DrawingSurface>(
        &self,
        labels: &[LabelImage],
        surface: S,
    ) -> Result<Vec<u8>, Error> {
        let grid = self.grid()?;
        place_and_finalize(&grid, labels, surface)
    }

    pub fn assemble(&self, labels: &[LabelImage]) -> Result<Vec<u8>, Error> {
        self.assemble_onto(labels, PdfSurface::new(&self.config.layout))
    }

    /// Full pipeline, keeping the rendered labels alongside the PDF.
    pub fn build(&self, start: u64, end: u64) -> Result<Sheet, Error> {
        let t0 = Instant::now();

        let ids = self.identifiers(start, end)?;
        let grid = self.grid()?;

        let labels = self.render_labels(&ids)?;
        let t_render = t0.elapsed();

        let pdf = place_and_finalize(&grid, &labels, PdfSurface::new(grid.layout()))?;
        let t_total = t0.elapsed();

        log::info!(
            "Timing: render={:.1}ms, layout={:.1}ms, total={:.1}ms ({} labels, {} pages, {} bytes)",
            t_render.as_secs_f64() * 1000.0,
            (t_total - t_render).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            labels.len(),
            page_count(labels.len(), &grid),
            pdf.len(),
        );

        Ok(Sheet { labels, pdf })
    }

    /// Full pipeline: range, identifiers, label images, paginated PDF bytes.
    pub fn generate(&self, start: u64, end: u64) -> Result<Vec<u8>, Error> {
        self.build(start, end).map(|sheet| sheet.pdf)
    }
}

fn place_and_finalize<S: DrawingSurface>(
    grid: &Grid,
    labels: &[LabelImage],
    mut surface: S,
) -> Result<Vec<u8>, Error> {
    paginate(labels, grid, &mut surface)?;
    surface.finalize()
}

/// Generate the sticker sheet PDF for `start..=end` with the fixed defaults.
pub fn generate_sheet(start: u64, end: u64) -> Result<Vec<u8>, Error> {
    SheetGenerator::new(SheetConfig::default()).generate(start, end)
}

/// Write `bytes` to `path`, naming the path in any I/O error.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    std::fs::write(path, bytes).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        ))
    })
}

pub fn write_sheet(start: u64, end: u64, output: &Path) -> Result<(), Error> {
    let bytes = generate_sheet(start, end)?;
    write_output(output, &bytes)?;
    log::info!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

/// Write each label as `<identifier>.png` into `dir`, creating it if needed.
pub fn write_label_images(labels: &[LabelImage], dir: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, dir.display()),
        ))
    })?;
    for label in labels {
        let path = dir.join(format!("{}.png", label.identifier));
        write_output(&path, &label.encode_png()?)?;
    }
    log::info!("Wrote {} label images to {}", labels.len(), dir.display());
    Ok(())
}
