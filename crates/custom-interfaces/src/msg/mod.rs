//! `custom_interfaces/msg/*`

pub mod aula7;
pub mod temperature;

pub use aula7::*;
pub use temperature::*;
