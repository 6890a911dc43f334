//! Data model for the medicine collection: the persisted document shape,
//! price parsing and currency rendering, form inputs and response bodies.

pub mod errors;
pub mod medicine;
pub mod price;
pub mod input;
pub mod views;

pub use medicine::{Medicine, MedicineDocument};
