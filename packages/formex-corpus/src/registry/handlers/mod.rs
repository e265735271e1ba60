//! Element handlers for Formex XML.

mod inline;
mod structural;

pub use inline::*;
pub use structural::*;
