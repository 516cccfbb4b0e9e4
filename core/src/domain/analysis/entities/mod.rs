pub mod analysis_request;
pub mod comparison;
pub mod product;
pub mod verdict;

pub use analysis_request::*;
pub use comparison::*;
pub use product::*;
pub use verdict::*;
