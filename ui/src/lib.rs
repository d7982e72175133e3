#![warn(clippy::all, rust_2018_idioms)]
//! egui front end of the resource console: pages, widgets and the
//! `eframe` app that drives the business state.

pub mod app;
pub mod pages;
pub mod state;
pub mod storage;
pub mod utils;
pub mod widgets;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_utils;

pub use app::ConsoleApp;
