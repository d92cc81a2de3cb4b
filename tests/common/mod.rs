use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use barcode_sheet::{
    Code128Renderer, DrawingSurface, Error, LabelImage, LabelRenderer, RenderOptions,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scratch directory under tests/output/, emptied first.
pub fn output_dir(case: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(case);
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("create output dir");
    dir
}

pub fn occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

/// Page count as declared by the PDF page tree.
pub fn pdf_page_count(pdf: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(pdf);
    let idx = text.find("/Count ")?;
    text[idx + "/Count ".len()..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|n| n.parse().ok())
}

/// Code 128 renderer that counts calls and can fail on one identifier.
#[derive(Default)]
pub struct CountingRenderer {
    pub calls: Cell<usize>,
    pub fail_on: Option<String>,
}

impl LabelRenderer for CountingRenderer {
    fn render(&self, identifier: &str, options: &RenderOptions) -> Result<LabelImage, Error> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_on.as_deref() == Some(identifier) {
            return Err(Error::Render {
                identifier: identifier.to_string(),
                reason: "renderer offline".into(),
            });
        }
        Code128Renderer.render(identifier, options)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub page: usize,
    pub identifier: String,
    pub x: f32,
    pub y: f32,
}

/// Surface that records where each label lands.
#[derive(Default)]
pub struct RecordingSurface {
    pub pages: usize,
    pub placed: Vec<Placed>,
}

impl DrawingSurface for RecordingSurface {
    fn begin_page(&mut self) -> Result<(), Error> {
        self.pages = 1;
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), Error> {
        self.pages += 1;
        Ok(())
    }

    fn place_image(
        &mut self,
        image: &LabelImage,
        x: f32,
        y: f32,
        _width: f32,
        _height: f32,
    ) -> Result<(), Error> {
        self.placed.push(Placed {
            page: self.pages - 1,
            identifier: image.identifier.clone(),
            x,
            y,
        });
        Ok(())
    }

    fn finalize(self) -> Result<Vec<u8>, Error> {
        Ok(format!("{} pages, {} labels", self.pages, self.placed.len()).into_bytes())
    }
}

/// Surface that fails on the `fail_at`-th placement (0-based).
pub struct FailingSurface {
    pub fail_at: usize,
    pub placed: usize,
}

impl DrawingSurface for FailingSurface {
    fn begin_page(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn place_image(
        &mut self,
        image: &LabelImage,
        _x: f32,
        _y: f32,
        _width: f32,
        _height: f32,
    ) -> Result<(), Error> {
        if self.placed == self.fail_at {
            return Err(Error::Draw(format!("no room for {}", image.identifier)));
        }
        self.placed += 1;
        Ok(())
    }

    fn finalize(self) -> Result<Vec<u8>, Error> {
        Ok(b"%PDF-unreachable".to_vec())
    }
}
