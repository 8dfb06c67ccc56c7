pub mod controls;
pub mod hover_panel;
pub mod skill_canvas;
