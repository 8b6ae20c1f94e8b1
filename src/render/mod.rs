//! Rendering seam.
//!
//! Renderers receive an owned [`RouteSnapshot`] and never hold a reference
//! into the episode.

mod snapshot;
mod svg;

pub use snapshot::RouteSnapshot;
pub use svg::SvgRenderer;

/// Consumes route snapshots and produces some output (an image, a frame, a log line).
pub trait Renderer {
    type Output;

    fn render(&mut self, snapshot: RouteSnapshot) -> Self::Output;
}
