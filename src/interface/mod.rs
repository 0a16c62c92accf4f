pub mod controller;
pub mod effect;
