//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the key-value and rendering capabilities into use-case APIs.
//! - Keep UI-binding layers decoupled from storage details.

pub mod catalog;
pub mod engagement;
pub mod export;
pub mod project_store;
