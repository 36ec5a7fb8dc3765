pub mod detect;
pub mod health;
pub mod lyrics;
pub mod selection;

pub use detect::*;
pub use health::*;
pub use lyrics::*;
pub use selection::*;
