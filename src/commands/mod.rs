//! Tauri IPC commands
//!
//! All commands exposed to the frontend via Tauri's invoke system.

pub mod home;
pub mod news;
pub mod portfolio;
pub mod profile;
pub mod refresh;
pub mod router;
