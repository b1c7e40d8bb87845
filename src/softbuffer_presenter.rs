use crate::error::{ViewError, ViewResult};
use crate::presenter::{SurfaceOrigin, SurfacePresenter};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::rc::Rc;
use winit::window::Window;

/// Presents frames into a window buffer through softbuffer.
///
/// Works with any handle softbuffer accepts; [`SoftBufferPresenter::from_winit`]
/// covers the common winit case.
pub struct SoftBufferPresenter<W: HasDisplayHandle + HasWindowHandle> {
    width: u32,
    height: u32,
    win_surface: Surface<W, W>,
}

impl SoftBufferPresenter<Rc<Window>> {
    pub fn from_winit(window: Window) -> ViewResult<SoftBufferPresenter<Rc<Window>>> {
        let size = window.inner_size();
        SoftBufferPresenter::new(Rc::new(window), size.width, size.height)
    }
}

impl<W: HasDisplayHandle + HasWindowHandle + Clone> SoftBufferPresenter<W> {
    pub fn new(window: W, width: u32, height: u32) -> ViewResult<SoftBufferPresenter<W>> {
        let context = Context::new(window.clone())?;
        let mut win_surface = Surface::new(&context, window)?;
        let (w, h) = buffer_size(width, height)?;
        win_surface.resize(w, h)?;
        Ok(SoftBufferPresenter {
            width,
            height,
            win_surface,
        })
    }

    pub fn window(&self) -> &W {
        self.win_surface.window()
    }
}

impl<W: HasDisplayHandle + HasWindowHandle + Clone> SurfacePresenter for SoftBufferPresenter<W> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn origin(&self) -> SurfaceOrigin {
        SurfaceOrigin::TopLeft
    }

    fn resize(&mut self, width: u32, height: u32) -> ViewResult<()> {
        let (w, h) = buffer_size(width, height)?;
        self.win_surface.resize(w, h)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn present(&mut self, pixels: &[u32], _width: u32, _height: u32) -> ViewResult<()> {
        let mut buffer = self.win_surface.buffer_mut()?;
        if buffer.len() != pixels.len() {
            return Err(ViewError::InvalidParameter);
        }
        buffer.copy_from_slice(pixels);
        buffer.present()?;
        Ok(())
    }
}

fn buffer_size(width: u32, height: u32) -> ViewResult<(NonZeroU32, NonZeroU32)> {
    let w = NonZeroU32::new(width).ok_or(ViewError::InvalidParameter)?;
    let h = NonZeroU32::new(height).ok_or(ViewError::InvalidParameter)?;
    Ok((w, h))
}
