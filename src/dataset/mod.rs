pub mod window;

pub use window::{train_window_count, WindowDataset, WindowSample};
