use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use seatbook_core::service::ReservationService;
use seatbook_core::store::ReservationStore;
use seatbook_core::table::{Backend, ReservationTable, SheetFile, SqliteTable};

const APP_NAME: &str = "seatbook";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Number of seats on the bus.
    pub capacity: u32,
    pub backend: Backend,
    /// Reservation file. `None` means `reservations.json` (or `.db`) in the data directory.
    pub data_file: Option<PathBuf>,
    /// Sheet holding the reservations, for the sheet backend.
    pub sheet: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            backend: Backend::Sheet,
            data_file: None,
            sheet: SheetFile::DEFAULT_SHEET.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the user's config directory.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load(path: Option<&Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    fn try_load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Resolved location of the reservation file.
    pub fn data_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        let dirs = project_dirs()?;
        let file_name = match self.backend {
            Backend::Sheet => "reservations.json",
            Backend::Sqlite => "reservations.db",
        };
        Ok(dirs.data_dir().join(file_name))
    }

    pub fn open_table(&self) -> Result<Box<dyn ReservationTable>> {
        let path = self.data_file()?;
        let table: Box<dyn ReservationTable> = match self.backend {
            Backend::Sheet => Box::new(SheetFile::with_sheet(path, self.sheet.clone())),
            Backend::Sqlite => Box::new(SqliteTable::new(path)),
        };
        Ok(table)
    }

    /// Create an empty reservation file. Fails if one already exists.
    pub fn create_table(&self) -> Result<PathBuf> {
        let path = self.data_file()?;
        match self.backend {
            Backend::Sheet => {
                SheetFile::create(&path, self.sheet.clone())?;
            }
            Backend::Sqlite => {
                SqliteTable::create(&path)?;
            }
        }
        Ok(path)
    }

    pub fn build_service(&self) -> Result<ReservationService> {
        let table = self.open_table()?;
        tracing::debug!(
            capacity = self.capacity,
            backend = self.backend.as_str(),
            table = %table.describe(),
            "Opening reservation store"
        );
        let store = ReservationStore::new(self.capacity, table)?;
        Ok(ReservationService::new(store))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

fn get_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.capacity, 20);
        assert_eq!(config.backend, Backend::Sheet);
        assert_eq!(config.sheet, "Reservations");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "capacity": 44, "backend": "sqlite" }"#).unwrap();

        let config = AppConfig::load(Some(&path));
        assert_eq!(config.capacity, 44);
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.sheet, "Reservations");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.json")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "capacity = 3").unwrap();

        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
    }

    #[test]
    fn test_explicit_data_file_wins() {
        let config = AppConfig {
            data_file: Some(PathBuf::from("/tmp/bus.json")),
            ..AppConfig::default()
        };
        assert_eq!(config.data_file().unwrap(), PathBuf::from("/tmp/bus.json"));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            capacity: 0,
            data_file: Some(dir.path().join("bus.json")),
            ..AppConfig::default()
        };
        assert!(config.build_service().is_err());
    }

    #[test]
    fn test_oversized_capacity_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            capacity: u32::MAX,
            data_file: Some(dir.path().join("bus.json")),
            ..AppConfig::default()
        };
        let err = config.build_service().err().expect("Capacity should be rejected");
        assert!(err.to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn test_create_table_per_backend() {
        let dir = tempfile::tempdir().unwrap();
        for (backend, name) in [(Backend::Sheet, "bus.json"), (Backend::Sqlite, "bus.db")] {
            let config = AppConfig {
                backend,
                data_file: Some(dir.path().join(name)),
                ..AppConfig::default()
            };
            let path = config.create_table().unwrap();
            assert!(path.exists());
            assert!(config.create_table().is_err());
        }
    }
}
