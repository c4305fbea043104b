//! Fitsphere: fitness plan API.
//!
//! Backend for the Fitsphere web app: account management with bearer-token
//! auth, template-based workout/nutrition plan generation, and a per-user
//! plan archive, all over JSON with a `{ success, ... }` envelope.

pub mod app;
pub mod auth;
pub mod config;
pub mod de;
pub mod error;
pub mod models;
pub mod plans;
pub mod state;
