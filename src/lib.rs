pub mod app;
pub mod board;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod query;
pub mod sources;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use board::{SlotBoard, fetcher::SlotFetcher, page::Page};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
