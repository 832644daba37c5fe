//! Model store
//!
//! Persists a fitted [`RankingEngine`] so a process can start serving
//! without refitting. The model is bincode-encoded, gzip-compressed and
//! written atomically; `metadata.json` carries its checksum.

use crate::error::{Result, StorageError};
use crate::snapshot::{ModelMetadata, ModelSnapshot, SnapshotRef, FORMAT_VERSION};
use atomicwrites::{AllowOverwrite, AtomicFile};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use schemefit_ranking::RankingEngine;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const MODEL_FILE: &str = "model.bin.gz";
pub const METADATA_FILE: &str = "metadata.json";

pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    /// Both the model and its metadata are present
    pub fn exists(&self) -> bool {
        self.model_path().is_file() && self.metadata_path().is_file()
    }

    pub fn save(&self, engine: &RankingEngine) -> Result<ModelMetadata> {
        let encoded = bincode::serialize(&SnapshotRef::of(engine))?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded)?;
        let compressed = encoder.finish()?;

        let checksum = format!("{:x}", Sha256::digest(&compressed));
        write_atomic(&self.model_path(), &compressed)?;

        let metadata = ModelMetadata::describe(engine, checksum, compressed.len() as u64);
        write_atomic(&self.metadata_path(), &serde_json::to_vec_pretty(&metadata)?)?;

        info!(
            "Saved model to {:?}: {} schemes, {} bytes",
            self.dir,
            metadata.total_schemes,
            metadata.size
        );
        Ok(metadata)
    }

    pub fn metadata(&self) -> Result<ModelMetadata> {
        let path = self.metadata_path();
        if !path.is_file() {
            return Err(StorageError::NotFound(self.dir.display().to_string()));
        }
        Ok(serde_json::from_slice(&fs::read(path)?)?)
    }

    /// Load the stored engine, verifying the model file against the
    /// recorded checksum first.
    pub fn load(&self) -> Result<RankingEngine> {
        let metadata = self.metadata()?;
        let model_path = self.model_path();
        if !model_path.is_file() {
            return Err(StorageError::NotFound(self.dir.display().to_string()));
        }

        let compressed = fs::read(&model_path)?;
        let actual = format!("{:x}", Sha256::digest(&compressed));
        if actual != metadata.checksum {
            return Err(StorageError::ChecksumMismatch {
                expected: metadata.checksum,
                actual,
            });
        }

        let mut encoded = Vec::new();
        GzDecoder::new(compressed.as_slice()).read_to_end(&mut encoded)?;
        let snapshot: ModelSnapshot = bincode::deserialize(&encoded)?;
        if snapshot.format_version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                expected: FORMAT_VERSION,
                found: snapshot.format_version,
            });
        }

        let engine = RankingEngine::from_parts(
            snapshot.catalog,
            snapshot.index,
            snapshot.keywords,
            snapshot.config,
        )?;
        info!("Loaded model from {:?} (created {})", self.dir, metadata.created_at);
        Ok(engine)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    AtomicFile::new(path, AllowOverwrite)
        .write(|f| f.write_all(bytes))
        .map_err(|e| StorageError::Io(std::io::Error::other(e.to_string())))
}
