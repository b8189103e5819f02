pub mod combined_canvas;
pub mod naming;
pub mod screen_file_path;
pub mod screen_pair;

// --- public re-exports ---
pub use combined_canvas::CombinedCanvas;
pub use naming::ScreenRole;
pub use screen_file_path::ScreenFilePath;
pub use screen_pair::ScreenPair;
