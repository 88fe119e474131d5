mod app;
mod components;
mod error;
mod message;
mod model;
mod service;
mod settings;
mod utils;
mod views;

pub fn main() -> iced::Result {
    app::run()
}
