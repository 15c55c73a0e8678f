//! Terminal User Interface for the relay dashboard

mod app;
mod ui;

pub use app::{DashApp, UiAction};
pub use ui::draw;
