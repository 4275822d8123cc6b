//! Command-line arguments for subway-waker.

mod args;

pub use args::{Args, VERSION};
