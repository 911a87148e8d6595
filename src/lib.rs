//! Pocket Snake - the classic Snake game in the terminal
//!
//! This library provides:
//! - Core game rules with no I/O (game module)
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - TUI rendering (render module)
//! - The event loop tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
