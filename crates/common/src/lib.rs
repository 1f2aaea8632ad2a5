//! Pieces shared by every crate in the workspace: logging bootstrap and
//! small wire types that are not tied to the school domain.

pub mod types;
pub mod utils;
