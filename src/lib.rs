//! X100V film simulation - library crate.
//!
//! Provides the preset store, the per-frame filter kernel and the frame loop
//! used by the desktop application.

pub mod error;
pub mod feed;
pub mod film;
pub mod frame;
pub mod image_io;
pub mod kernel;
pub mod source;

pub use error::{FilmError, Result};
