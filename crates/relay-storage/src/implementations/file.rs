//! File-based storage backend.
//!
//! Each entry is one file under the configured directory. The directory is
//! owned by a single process at a time through an exclusive advisory lock on
//! `.lock`, and conditional inserts are made atomic by hard-linking a fully
//! written temporary file into place, which fails if the target exists.

use crate::{StorageError, StorageFactory, StorageInterface, StorageRegistry};
use async_trait::async_trait;
use fs2::FileExt;
use relay_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, ValidationError};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;

const LOCK_FILE: &str = ".lock";
const DEFAULT_STORAGE_PATH: &str = "./data/nonces";

/// File-based storage implementation.
pub struct FileStorage {
	/// Base directory path for storing files.
	base_path: PathBuf,
	/// Held for the lifetime of the storage; dropping it releases the lock.
	_lock: File,
	/// Distinguishes temporary files written by concurrent tasks.
	tmp_counter: AtomicU64,
}

impl FileStorage {
	/// Opens (creating if needed) a storage directory and takes its lock.
	///
	/// Fails if another process already holds the directory.
	pub fn open(base_path: impl AsRef<Path>) -> Result<Self, StorageError> {
		let base_path = base_path.as_ref().to_path_buf();
		std::fs::create_dir_all(&base_path).map_err(|e| {
			StorageError::Backend(format!("Cannot create {}: {}", base_path.display(), e))
		})?;

		let lock = File::create(base_path.join(LOCK_FILE))
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		lock.try_lock_exclusive().map_err(|e| {
			StorageError::Backend(format!(
				"Storage directory {} is locked by another process: {}",
				base_path.display(),
				e
			))
		})?;

		tracing::debug!(path = %base_path.display(), "Opened file storage");

		Ok(Self {
			base_path,
			_lock: lock,
			tmp_counter: AtomicU64::new(0),
		})
	}

	/// Converts a storage key to a filesystem-safe file path.
	fn get_file_path(&self, key: &str) -> PathBuf {
		let safe_key = key.replace(['/', '\\', ':'], "_");
		self.base_path.join(format!("{}.bin", safe_key))
	}

	/// Writes `value` to a fresh temporary file next to `path`.
	async fn write_temp(&self, path: &Path, value: &[u8]) -> Result<PathBuf, StorageError> {
		let seq = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
		let temp_path = path.with_extension(format!("{}.tmp", seq));
		fs::write(&temp_path, value)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		Ok(temp_path)
	}
}

#[async_trait]
impl StorageInterface for FileStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let path = self.get_file_path(key);
		match fs::read(&path).await {
			Ok(data) => Ok(data),
			Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let path = self.get_file_path(key);
		let temp_path = self.write_temp(&path, &value).await?;

		fs::rename(&temp_path, &path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))
	}

	async fn insert_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool, StorageError> {
		let path = self.get_file_path(key);
		let temp_path = self.write_temp(&path, &value).await?;

		let linked = match fs::hard_link(&temp_path, &path).await {
			Ok(()) => Ok(true),
			Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		};

		if let Err(e) = fs::remove_file(&temp_path).await {
			tracing::warn!("Failed to remove temporary file {:?}: {}", temp_path, e);
		}

		linked
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let path = self.get_file_path(key);
		match fs::remove_file(&path).await {
			Ok(_) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let path = self.get_file_path(key);
		fs::try_exists(&path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FileStorageSchema)
	}
}

/// Configuration schema for FileStorage.
pub struct FileStorageSchema;

impl ConfigSchema for FileStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![Field::new("storage_path", FieldType::String).with_validator(|v| {
				match v.as_str() {
					Some(s) if !s.trim().is_empty() => Ok(()),
					_ => Err("storage_path cannot be empty".to_string()),
				}
			})],
		);
		schema.validate(config)
	}
}

/// Factory function to create a file storage backend from configuration.
///
/// Configuration parameters:
/// - `storage_path`: directory for entries (default: "./data/nonces")
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	FileStorageSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;

	let storage_path = config
		.get("storage_path")
		.and_then(|v| v.as_str())
		.unwrap_or(DEFAULT_STORAGE_PATH);

	Ok(Box::new(FileStorage::open(storage_path)?))
}

/// Registry for the file storage implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "file";
	type Factory = StorageFactory;

	fn factory() -> Self::Factory {
		create_storage
	}
}

impl StorageRegistry for Registry {}
