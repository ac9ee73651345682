//! Rendering layer: egui widgets over the core data/text artifacts.
//! Labels, chart construction, and layout live here, never in the core.

pub mod charts;
pub mod panels;
pub mod table;
