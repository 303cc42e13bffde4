//! ccna-course - a self-paced CCNA IPv4 course player
//!
//! Walks a learner through a fixed curriculum where each section unlocks
//! once the previous one is completed. Quizzes gate progression at a
//! 60% pass mark, and progress is mirrored to a REST backend.

pub mod admin;
pub mod app;
pub mod backend;
pub mod config;
pub mod course;
pub mod ui;

pub use app::App;
pub use config::Config;
