pub mod api;
pub mod collector;
pub mod config;
pub mod controller;
pub mod error;
pub mod fields;
pub mod form;
pub mod options;
pub mod persistence;
pub mod refresh;
pub mod render;
pub mod surface;
pub mod ui;
pub mod validator;

#[cfg(test)]
mod testing;
