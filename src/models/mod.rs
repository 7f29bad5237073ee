// src/models/mod.rs
pub mod driver;
pub mod fare;
pub mod person;
pub mod ride;

pub use driver::*;
pub use fare::*;
pub use person::*;
pub use ride::*;
