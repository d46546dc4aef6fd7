//! Pure data structures shared by the registries, the state machine and the views.

pub mod actor;
pub mod phase;
pub mod principal;
pub mod product;

pub use actor::*;
pub use phase::*;
pub use principal::*;
pub use product::*;
