pub mod image_viewer;
pub mod landing;
pub mod report_panel;
pub mod status_screens;

pub use image_viewer::image_viewer;
pub use landing::landing;
pub use report_panel::report_panel;
pub use status_screens::{failure, processing};
