//! File formats around the search core.
//!
//! The runners never touch the filesystem; callers use these helpers to
//! load a matrix before a run and to persist or reload the best tour.

mod matrix;
mod tour;

pub use matrix::{load_matrix, parse_matrix};
pub use tour::{format_tour, load_tour, parse_tour, save_tour};
