use crate::errors::AppError;
use crate::models::SlotStore;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/slots.json"))
}

pub async fn load_data(path: &Path) -> SlotStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse slot store {}: {err}", path.display());
                SlotStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => SlotStore::default(),
        Err(err) => {
            error!("failed to read slot store {}: {err}", path.display());
            SlotStore::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &SlotStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{MockSource, SlotSource, replace_from_sources};
    use chrono::NaiveDate;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("slot_board_{name}_{}_{nanos}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty_store() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.slots.is_empty());
        assert_eq!(data.next_id, 1);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_store() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        let data = load_data(&path).await;
        assert!(data.slots.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_store_reloads() {
        let path = temp_path("persist");
        let now = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let sources: Vec<Box<dyn SlotSource>> = vec![Box::new(MockSource)];
        let mut data = SlotStore::default();
        replace_from_sources(&mut data, &sources, now);

        persist_data(&path, &data).await.unwrap();
        let reloaded = load_data(&path).await;

        assert_eq!(reloaded.slots.len(), 3);
        assert_eq!(reloaded.next_id, data.next_id);
        assert_eq!(reloaded.slots[0].club, data.slots[0].club);
        let _ = fs::remove_file(&path).await;
    }
}
