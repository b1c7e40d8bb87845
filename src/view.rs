use crate::color::Color;
use crate::error::{ViewError, ViewResult};
use crate::presenter::{SurfaceOrigin, SurfacePresenter};
use log::debug;
use measure_time::debug_time;
use skia_safe::{surfaces, AlphaType, Canvas, ColorSpace, ColorType, ImageInfo};
use std::slice;

/// View component backed by a raw pixel buffer.
///
/// Each `render` wraps the buffer in a skia raster surface, clears it to the
/// background color, runs the drawing callback against the surface's canvas
/// and hands the pixels to the presenter. Rows are flipped vertically first
/// when the presenter's origin is at the bottom left.
pub struct CanvasView<P: SurfacePresenter> {
    presenter: P,
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    background: Color,
}

impl<P: SurfacePresenter> CanvasView<P> {
    pub fn new(presenter: P) -> CanvasView<P> {
        let (width, height) = presenter.size();
        CanvasView {
            presenter,
            pixels: vec![0; (width * height) as usize],
            width,
            height,
            background: Color::TRANSPARENT,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn resize(&mut self, width: u32, height: u32) -> ViewResult<()> {
        if width == 0 || height == 0 {
            return Err(ViewError::InvalidParameter);
        }
        self.presenter.resize(width, height)?;
        self.pixels = vec![0; (width * height) as usize];
        self.width = width;
        self.height = height;
        debug!("canvas resized to {}x{}", width, height);
        Ok(())
    }

    /// Draws one frame through `draw` and presents it.
    pub fn render<F: FnOnce(&Canvas)>(&mut self, draw: F) -> ViewResult<()> {
        if self.width == 0 || self.height == 0 {
            debug!("skip rendering on empty canvas");
            return Ok(());
        }
        debug_time!("render time");
        let img_info = ImageInfo::new(
            (self.width as i32, self.height as i32),
            ColorType::BGRA8888,
            AlphaType::Premul,
            Some(ColorSpace::new_srgb()),
        );
        let row_bytes = self.width as usize * 4;
        let buf = unsafe {
            slice::from_raw_parts_mut(self.pixels.as_mut_ptr() as *mut u8, self.pixels.len() * 4)
        };
        let mut surface = surfaces::wrap_pixels(&img_info, buf, row_bytes, None)
            .ok_or(ViewError::SurfaceCreation)?;
        let canvas = surface.canvas();
        canvas.clear(skia_safe::Color::from(self.background));
        draw(canvas);
        drop(surface);

        if self.presenter.origin() == SurfaceOrigin::BottomLeft {
            flip_vertical(&mut self.pixels, self.width as usize, self.height as usize);
        }
        self.presenter.present(&self.pixels, self.width, self.height)
    }
}

fn flip_vertical(pixels: &mut [u32], width: usize, height: usize) {
    let mut top = 0;
    let mut bottom = height - 1;
    while top < bottom {
        let (head, tail) = pixels.split_at_mut(bottom * width);
        head[top * width..(top + 1) * width].swap_with_slice(&mut tail[..width]);
        top += 1;
        bottom -= 1;
    }
}
