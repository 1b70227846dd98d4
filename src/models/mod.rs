pub mod filter;
pub mod identity;
pub mod item;

pub use filter::*;
pub use identity::*;
pub use item::*;
