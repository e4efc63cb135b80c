//! `custom_interfaces/srv/*`

pub mod aula8;
pub mod celsius_to_fahrenheit;

pub use aula8::*;
pub use celsius_to_fahrenheit::*;
