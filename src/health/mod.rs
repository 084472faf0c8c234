mod checks;
#[cfg(test)]
pub mod mock;

pub use checks::{HttpProbe, Probe};
#[cfg(test)]
pub use mock::MockProbe;
