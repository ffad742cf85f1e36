pub mod loader;

pub use loader::{load_ticks, read_ticks};
