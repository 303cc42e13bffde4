//! Plain-text rendering for the terminal

pub mod certificate;
pub mod curriculum;
pub mod dashboard;
pub mod quiz_panel;

pub use curriculum::progress_bar;
