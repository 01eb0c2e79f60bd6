//! SQL rendition of the filter engine on top of sea-orm selects.

pub mod relations;
pub mod select;
