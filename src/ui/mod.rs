pub mod app;
pub mod effects;
pub mod message;
pub mod screens;
pub mod state;
