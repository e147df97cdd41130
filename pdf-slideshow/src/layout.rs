//! Page placement inside the fixed viewport.
//!
//! [`fit`] and [`place`] are pure geometry. [`RenderRequestAdapter`] couples them
//! with a [`PageSource`] and produces the resampled bitmaps that get drawn.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::page_group::{pages_for, DisplayMode};
use crate::renderer::PageSource;

/// Fixed region available for page images, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportBox {
    pub width: u32,
    pub height: u32,
}

impl ViewportBox {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewport covering `scale` of a screen of the given size.
    pub fn from_screen(screen_width: f32, screen_height: f32, scale: f32) -> Self {
        Self {
            width: (screen_width * scale) as u32,
            height: (screen_height * scale) as u32,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Largest size with the aspect ratio of `source` that fits in the box.
///
/// All dimensions must be non-zero.
pub fn fit(source_width: u32, source_height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    let source_ratio = f64::from(source_width) / f64::from(source_height);
    let box_ratio = f64::from(box_width) / f64::from(box_height);

    if source_ratio > box_ratio {
        let height = (f64::from(box_width) / source_ratio).round() as u32;
        (box_width, height.clamp(1, box_height))
    } else {
        let width = (f64::from(box_height) * source_ratio).round() as u32;
        (width.clamp(1, box_width), box_height)
    }
}

/// A page scaled and positioned on the canvas. The anchor is the image centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedImage {
    pub page_index: usize,
    pub width: u32,
    pub height: u32,
    pub anchor_x: i32,
    pub anchor_y: i32,
}

impl PlacedImage {
    pub fn top_left(&self) -> (i32, i32) {
        (
            self.anchor_x - (self.width / 2) as i32,
            self.anchor_y - (self.height / 2) as i32,
        )
    }
}

/// Natural size of a page bitmap before it is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePage {
    pub page_index: usize,
    pub width: u32,
    pub height: u32,
}

/// Places up to `mode.slots()` pages in the viewport, left slot first.
///
/// In double mode each page is fitted into its half and then pulled towards
/// the centre seam so the pair leaves a gutter of `2 * margin` pixels.
pub fn place(
    mode: DisplayMode,
    viewport: ViewportBox,
    pages: &[SourcePage],
    margin: u32,
) -> Vec<PlacedImage> {
    let anchor_y = (viewport.height / 2) as i32;

    match mode {
        DisplayMode::Single => pages
            .iter()
            .take(mode.slots())
            .map(|page| {
                let (width, height) = fit(page.width, page.height, viewport.width, viewport.height);
                PlacedImage {
                    page_index: page.page_index,
                    width,
                    height,
                    anchor_x: (viewport.width / 2) as i32,
                    anchor_y,
                }
            })
            .collect(),
        DisplayMode::Double => {
            let half_width = viewport.width / 2;
            let slot_centre = (half_width / 2) as i32;

            pages
                .iter()
                .take(mode.slots())
                .enumerate()
                .map(|(slot, page)| {
                    let (width, height) = fit(page.width, page.height, half_width, viewport.height);
                    let offset = ((half_width as i32 - width as i32) / 2 - margin as i32).max(0);
                    let anchor_x = if slot == 0 {
                        slot_centre + offset
                    } else {
                        half_width as i32 + slot_centre - offset
                    };
                    PlacedImage {
                        page_index: page.page_index,
                        width,
                        height,
                        anchor_x,
                        anchor_y,
                    }
                })
                .collect()
        }
    }
}

/// A placement together with the bitmap resampled to its size.
#[derive(Debug, Clone)]
pub struct PlacedFrame {
    pub placement: PlacedImage,
    pub image: RgbaImage,
}

/// Issues the render calls for a position and lays the results out.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequestAdapter {
    pub mode: DisplayMode,
    pub zoom: f32,
    pub margin: u32,
}

impl RenderRequestAdapter {
    const PLACEHOLDER_SIZE: (u32, u32) = (210, 297);
    const PLACEHOLDER_FILL: Rgba<u8> = Rgba([0x55, 0x55, 0x55, 0xff]);

    pub fn new(mode: DisplayMode, zoom: f32, margin: u32) -> Self {
        Self { mode, zoom, margin }
    }

    /// Renders the pages at `position` and scales them into `viewport`.
    ///
    /// A page that fails to render is replaced by a blank placeholder.
    pub fn render(
        &self,
        source: &dyn PageSource,
        viewport: ViewportBox,
        position: usize,
    ) -> Vec<PlacedFrame> {
        if viewport.is_degenerate() {
            tracing::warn!(?viewport, "viewport has no area, skipping render");
            return Vec::new();
        }

        let group = pages_for(position, source.page_count(), self.mode);
        let bitmaps: Vec<RgbaImage> = group
            .to_vec()
            .into_iter()
            .map(|page_index| self.render_one(source, page_index))
            .collect();

        let sources: Vec<SourcePage> = group
            .to_vec()
            .into_iter()
            .zip(&bitmaps)
            .map(|(page_index, bitmap)| SourcePage {
                page_index,
                width: bitmap.width(),
                height: bitmap.height(),
            })
            .collect();

        place(self.mode, viewport, &sources, self.margin)
            .into_iter()
            .zip(bitmaps)
            .map(|(placement, bitmap)| PlacedFrame {
                image: imageops::resize(
                    &bitmap,
                    placement.width,
                    placement.height,
                    FilterType::Lanczos3,
                ),
                placement,
            })
            .collect()
    }

    fn render_one(&self, source: &dyn PageSource, page_index: usize) -> RgbaImage {
        let rendered = source
            .render_page(page_index, self.zoom)
            .and_then(|page| page.into_image());

        match rendered {
            Ok(image) if image.width() > 0 && image.height() > 0 => image.into_rgba8(),
            Ok(_) => {
                tracing::error!(page_index, "page rendered to an empty bitmap");
                Self::placeholder()
            }
            Err(e) => {
                tracing::error!("Failed to render page {}: {}", page_index, e);
                Self::placeholder()
            }
        }
    }

    fn placeholder() -> RgbaImage {
        let (width, height) = Self::PLACEHOLDER_SIZE;
        RgbaImage::from_pixel(width, height, Self::PLACEHOLDER_FILL)
    }
}
