//! Clause model shared by the builder and the renderers.

pub mod conditions;
pub mod operators;
pub mod values;

pub use conditions::*;
pub use operators::*;
pub use values::*;
