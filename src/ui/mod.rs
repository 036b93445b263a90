pub mod renderer;
pub mod text;

pub use renderer::{PixmapSurface, RendererError, RoiLayout};
