//! Tabular writers: project a [`ContentTree`](crate::types::ContentTree)
//! back into rows.
//!
//! - [`write_overlay`] keeps the customer's sheet and fills the generated
//!   columns next to their original copy.
//! - [`write_fresh`] builds a canonical sheet when there is no original.

mod fresh;
mod overlay;
mod rows;

pub use fresh::write_fresh;
pub use overlay::write_overlay;
