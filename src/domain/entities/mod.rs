//! Domain entities representing core business data structures.
//!
//! - [`RedirectEntry`] - One declared path → URL pair
//! - [`RedirectMapping`] - Lookup table folded from ordered entries

pub mod redirect;

pub use redirect::{RedirectEntry, RedirectMapping, build_mapping};
