pub mod color;
pub mod error;
pub mod presenter;
pub mod softbuffer_presenter;
pub mod view;

pub use color::Color;
pub use error::{ViewError, ViewResult};
pub use presenter::{SurfaceOrigin, SurfacePresenter};
pub use softbuffer_presenter::SoftBufferPresenter;
pub use view::CanvasView;

pub use skia_safe::Canvas;
