pub mod pricelist;
pub mod product;
pub mod wire;

pub use pricelist::*;
pub use product::*;
