use image::{DynamicImage, RgbImage, RgbaImage};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to bind to PDFium library, install PDFium or place it next to the executable: {0}")]
    LibraryUnavailable(#[source] PdfiumError),
    #[error("document {} is corrupt or unreadable: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: PdfiumError,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page {0} is out of bounds")]
    OutOfBounds(usize),
    #[error("failed to render page {page}: {source}")]
    Pdfium {
        page: usize,
        #[source]
        source: PdfiumError,
    },
    #[error("pixel buffer of {len} bytes does not match a {width}x{height} image")]
    BufferMismatch { width: u32, height: u32, len: usize },
}

/// A rasterised page as produced by the rendering backend.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub has_alpha: bool,
}

impl RenderedPage {
    pub fn into_image(self) -> Result<DynamicImage, RenderError> {
        let (width, height) = (self.width, self.height);
        let len = self.pixels.len();
        let mismatch = || RenderError::BufferMismatch { width, height, len };

        if self.has_alpha {
            RgbaImage::from_raw(width, height, self.pixels)
                .map(DynamicImage::ImageRgba8)
                .ok_or_else(mismatch)
        } else {
            RgbImage::from_raw(width, height, self.pixels)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(mismatch)
        }
    }
}

/// Source of page bitmaps for an opened document.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Rasterises `page_index` at `zoom` times its natural size.
    fn render_page(&self, page_index: usize, zoom: f32) -> Result<RenderedPage, RenderError>;
}

/// PDF document rendered with pdfium-render
pub struct PdfiumSource {
    inner: PdfDocument<'static>,
}

impl std::fmt::Debug for PdfiumSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfiumSource")
            .field("page_count", &self.page_count())
            .finish()
    }
}

impl PdfiumSource {
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        if !path.is_file() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }

        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(DocumentError::LibraryUnavailable)?;

        // The document is open for the whole session, so the library handle is too.
        let pdfium: &'static Pdfium = Box::leak(Box::new(Pdfium::new(bindings)));

        let inner = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|source| DocumentError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path.display(), pages = inner.pages().len(), "opened document");
        Ok(Self { inner })
    }
}

impl PageSource for PdfiumSource {
    fn page_count(&self) -> usize {
        self.inner.pages().len() as usize
    }

    fn render_page(&self, page_index: usize, zoom: f32) -> Result<RenderedPage, RenderError> {
        let index = u16::try_from(page_index).map_err(|_| RenderError::OutOfBounds(page_index))?;
        let page = self
            .inner
            .pages()
            .get(index)
            .map_err(|_| RenderError::OutOfBounds(page_index))?;

        let render_width = (page.width().value * zoom) as i32;
        let render_height = (page.height().value * zoom) as i32;

        let render_config = PdfRenderConfig::new()
            .set_target_width(render_width)
            .set_maximum_height(render_height)
            .rotate_if_landscape(PdfPageRenderRotation::None, false);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|source| RenderError::Pdfium {
                page: page_index,
                source,
            })?;

        Ok(RenderedPage {
            width: bitmap.width() as u32,
            height: bitmap.height() as u32,
            pixels: bitmap.as_rgba_bytes(),
            has_alpha: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        match PdfiumSource::open(&path) {
            Err(DocumentError::NotFound(reported)) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_not_a_document() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            PdfiumSource::open(dir.path()),
            Err(DocumentError::NotFound(_))
        ));
    }

    #[test]
    fn rgb_buffer_converts() {
        let page = RenderedPage {
            width: 2,
            height: 1,
            pixels: vec![255, 0, 0, 0, 255, 0],
            has_alpha: false,
        };
        let image = page.into_image().unwrap();
        assert_eq!((image.width(), image.height()), (2, 1));
        assert!(matches!(image, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let page = RenderedPage {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
            has_alpha: true,
        };
        assert!(matches!(
            page.into_image(),
            Err(RenderError::BufferMismatch { len: 10, .. })
        ));
    }
}
