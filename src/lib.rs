//! MemeLord - turns a short topic into an AI-generated meme
//!
//! Drives a two-stage generation pipeline: a text model writes a caption and
//! an image prompt, then an image model renders the picture. The result is a
//! self-contained meme record with the image embedded as a data URI.

pub mod ai;
pub mod app;
pub mod data_uri;
pub mod error;
pub mod models;
pub mod prompts;
pub mod view;

pub use error::{Error, Result};
