//! SeaORM entity models for the interaction catalog.

pub mod article;
pub mod compound;
pub mod interaction;
pub mod model;
pub mod plant;
pub mod source;

pub use interaction::{decode_list, encode_list};
