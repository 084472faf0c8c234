mod cycle;
mod health;
mod target;

pub use cycle::*;
pub use health::*;
pub use target::*;
