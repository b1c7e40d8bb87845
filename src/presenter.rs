use crate::error::ViewResult;

/// Where the presenting context puts its first pixel row.
///
/// Presenters reporting [`SurfaceOrigin::BottomLeft`] receive the rendered
/// rows flipped vertically, so the image appears upright on targets whose
/// coordinate system is inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOrigin {
    TopLeft,
    BottomLeft,
}

/// Puts rendered pixels on screen.
///
/// `present` receives premultiplied BGRA pixels, one `u32` per pixel,
/// row-major in the presenter's own row order.
pub trait SurfacePresenter {
    fn size(&self) -> (u32, u32);

    fn origin(&self) -> SurfaceOrigin {
        SurfaceOrigin::TopLeft
    }

    fn resize(&mut self, width: u32, height: u32) -> ViewResult<()>;

    fn present(&mut self, pixels: &[u32], width: u32, height: u32) -> ViewResult<()>;
}
