#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod compose;
mod dimension;
mod error;
mod generator;
mod grid;
mod location;
mod preview;
mod scheme;
mod store;
mod time;

pub use crate::compose::*;
pub use crate::dimension::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::grid::*;
pub use crate::location::*;
pub use crate::preview::*;
pub use crate::scheme::*;
pub use crate::store::*;
pub use crate::time::*;
