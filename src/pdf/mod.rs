pub(crate) mod layout;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::model::{LabelImage, SheetLayout};

use layout::DrawingSurface;

const CAPTION_FONT: &[u8] = b"F1";
/// Courier advance width in 1000 units/em; every glyph is the same width.
const COURIER_ADVANCE: f32 = 600.0;

struct PageContent {
    content: Content,
    images: Vec<(String, Ref)>,
}

/// In-memory PDF document built page by page.
///
/// Label rasters are written as image XObjects as soon as they are placed;
/// pages, the page tree and the caption font are written by [`finalize`].
///
/// [`finalize`]: DrawingSurface::finalize
pub struct PdfSurface {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    media_box: Rect,
    pages: Vec<PageContent>,
    image_count: usize,
}

impl PdfSurface {
    pub fn new(layout: &SheetLayout) -> Self {
        let mut surface = Self {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            font_id: Ref::new(1),
            media_box: Rect::new(0.0, 0.0, layout.page_width, layout.page_height),
            pages: Vec::new(),
            image_count: 0,
        };
        surface.catalog_id = surface.alloc();
        surface.pages_id = surface.alloc();
        surface.font_id = surface.alloc();
        surface
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    fn open_page(&mut self) {
        self.pages.push(PageContent {
            content: Content::new(),
            images: Vec::new(),
        });
    }

    fn embed_image(&mut self, image: &LabelImage) -> (String, Ref) {
        let xobj_ref = self.alloc();
        self.image_count += 1;
        let pdf_name = format!("Im{}", self.image_count);

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(image.pixels.as_raw(), 6);
        let mut xobj = self.pdf.image_xobject(xobj_ref, &compressed);
        xobj.filter(Filter::FlateDecode);
        xobj.width(image.pixel_width() as i32);
        xobj.height(image.pixel_height() as i32);
        xobj.color_space().device_gray();
        xobj.bits_per_component(8);

        (pdf_name, xobj_ref)
    }
}

fn draw_caption(content: &mut Content, image: &LabelImage, x: f32, y: f32, w: f32, h: f32) {
    let chars = image.identifier.chars().count();
    if chars == 0 || image.caption_size <= 0.0 {
        return;
    }
    // Shrink the caption if it would overflow the cell.
    let per_char = COURIER_ADVANCE / 1000.0;
    let font_size = (image.caption_size * h).min(w / (per_char * chars as f32));
    let text_w = per_char * font_size * chars as f32;
    let tx = x + (w - text_w) / 2.0;
    let ty = y + image.caption_baseline * h;

    content
        .set_fill_gray(0.0)
        .begin_text()
        .set_font(Name(CAPTION_FONT), font_size)
        .next_line(tx, ty)
        .show(Str(image.identifier.as_bytes()))
        .end_text();
}

impl DrawingSurface for PdfSurface {
    fn begin_page(&mut self) -> Result<(), Error> {
        if !self.pages.is_empty() {
            return Err(Error::Draw("document already has an open page".into()));
        }
        self.open_page();
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), Error> {
        if self.pages.is_empty() {
            return Err(Error::Draw("new_page called before begin_page".into()));
        }
        self.open_page();
        Ok(())
    }

    fn place_image(
        &mut self,
        image: &LabelImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), Error> {
        if self.pages.is_empty() {
            return Err(Error::Draw(format!(
                "cannot place {} before a page is open",
                image.identifier
            )));
        }
        if image.pixel_width() == 0 || image.pixel_height() == 0 {
            return Err(Error::Draw(format!("label {} has no pixels", image.identifier)));
        }

        let (pdf_name, xobj_ref) = self.embed_image(image);
        let Some(page) = self.pages.last_mut() else {
            return Err(Error::Draw("no open page".into()));
        };
        page.content.save_state();
        page.content.transform([width, 0.0, 0.0, height, x, y]);
        page.content.x_object(Name(pdf_name.as_bytes()));
        page.content.restore_state();
        draw_caption(&mut page.content, image, x, y, width, height);
        page.images.push((pdf_name, xobj_ref));
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>, Error> {
        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let info_id = self.alloc();

        let pages = std::mem::take(&mut self.pages);
        let mut page_images = Vec::with_capacity(n);
        for (i, page) in pages.into_iter().enumerate() {
            let raw = page.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            self.pdf
                .stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
            log::debug!("Page {}: {} labels", i + 1, page.images.len());
            page_images.push(page.images);
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);
        self.pdf
            .type1_font(self.font_id)
            .base_font(Name(b"Courier"));

        for (i, images) in page_images.iter().enumerate() {
            let mut page = self.pdf.page(page_ids[i]);
            page.media_box(self.media_box)
                .parent(self.pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            resources.fonts().pair(Name(CAPTION_FONT), self.font_id);
            if !images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in images {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        self.pdf
            .document_info(info_id)
            .title(TextStr("Barcode sticker sheet"))
            .creator(TextStr("barcode-sheet"));

        Ok(self.pdf.finish())
    }
}
