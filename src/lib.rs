//! Scroll-driven view state for a single-page portfolio.
//!
//! The page is parsed into a mutable [`dom::Document`], laid out by
//! [`render::layout`], and then driven by [`view::ViewController`]: scroll
//! and pointer input go in, class flags, counter text and inline transforms
//! come out once per frame.

pub mod config;
pub mod content;
pub mod dom;
pub mod engine;
pub mod error;
pub mod net;
pub mod render;
pub mod view;

pub use config::SiteConfig;
pub use error::{FolioError, Result};
