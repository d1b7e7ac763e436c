//! Terminal UI: game view with drop animation, game-over overlay, and the
//! replayed move history.

mod app;
pub mod board_widget;
mod game_view;
mod history_view;

pub use app::App;
