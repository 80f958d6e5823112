pub mod movement;
pub mod render;
pub mod rules;
pub mod scoring;

pub use movement::*;
pub use render::*;
pub use rules::*;
pub use scoring::*;
