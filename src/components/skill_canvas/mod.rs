mod component;
mod render;
mod state;
mod types;

pub use component::SkillCanvas;
pub use types::CanvasData;
