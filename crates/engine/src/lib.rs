// Library crate: exposes the layout engine and display state for the
// headless binary and integration tests. Rendering, picking, and the
// hierarchy UI live with the embedding application.

pub mod explode;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod scene;
pub mod state;
