pub mod catalog;
pub mod descriptor;
pub mod selection;

pub use catalog::*;
pub use descriptor::*;
pub use selection::*;
