//! Domain models for the Warehouse Inventory Management Platform

mod batch;
mod movement;
mod product;
mod report;

pub use batch::*;
pub use movement::*;
pub use product::*;
pub use report::*;
