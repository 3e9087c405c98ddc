//! Terminal chat client for the Gemini generative-language API
//!
//! Each user turn (text and/or an image) is assembled, sent to the
//! `generateContent` endpoint in a single request, and the reply is appended
//! to an in-memory transcript rendered by the REPL.

pub mod ai;
pub mod app;
pub mod assembler;
pub mod commands;
pub mod display;
pub mod error;
pub mod feedback;
pub mod image;
pub mod models;
pub mod prompts;
pub mod settings;

pub use error::{Error, Result};
