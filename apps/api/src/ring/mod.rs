// Segmented ownership rings drawn around card avatars.
// Geometry is pure; handlers only validate request size and serialize.

pub mod geometry;
pub mod handlers;
pub mod svg;
