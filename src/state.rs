use crate::models::SlotStore;
use crate::sources::SlotSource;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<SlotStore>>,
    pub sources: Arc<Vec<Box<dyn SlotSource>>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: SlotStore, sources: Vec<Box<dyn SlotSource>>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            sources: Arc::new(sources),
        }
    }
}
