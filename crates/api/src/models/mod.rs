pub mod descriptor;
pub mod mirror;
pub mod outcome;
pub mod package;

pub use descriptor::*;
pub use mirror::*;
pub use outcome::*;
pub use package::*;
