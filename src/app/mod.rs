// src/app/mod.rs
//! Application module - ties the player, the playlist and the terminal
//! together.

pub mod state;

// Re-export the App struct
pub use state::App;
