pub mod context;
pub mod glyphs;
pub mod renderer;
pub mod style;
pub mod surface;

// Re-export main types
pub use context::{DrawCommand, RenderContext};
pub use renderer::MapRenderer;
pub use style::{Color, LabelStyle, MapStyle, MarkerStyle};
pub use surface::Surface;
