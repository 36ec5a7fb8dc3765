pub mod lyrics;
pub mod requests;

pub use lyrics::*;
pub use requests::*;
