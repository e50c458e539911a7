//! Rendering module for emojigen.
//!
//! Faces are lowered to drawing primitives by [`FaceGeometry`] and painted
//! by one of two backends: a bitmap ([`RasterSurface`]) or SVG markup
//! ([`SvgSurface`]).

mod geometry;
mod png;
mod raster;
mod svg;

pub use geometry::{render_with, FaceGeometry, Half, Primitive, Surface};
pub use png::encode_png;
pub use raster::{render_bitmap, render_primitives, RasterSurface};
pub use svg::{render_svg, SvgSurface};
