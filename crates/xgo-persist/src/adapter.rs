use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PersistError, Result};

/// File magic identifying an XGo data file.
pub const MAGIC: [u8; 4] = *b"XGO1";

/// Current on-disk format version.
pub const FORMAT_VERSION: u16 = 1;

/// Header size: 4 bytes magic + 2 bytes version + 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 14;

/// Flush strategy for saves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` the temporary file before it is renamed into place.
    #[default]
    Full,
    /// Rely on OS page-cache buffering (faster, not crash-durable).
    OsDefault,
}

/// Binary persistence for a single root object of type `T`.
///
/// On-disk format:
/// ```text
/// [4 bytes: magic "XGO1"]
/// [2 bytes: format version (little-endian u16)]
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized T)]
/// ```
///
/// Anything else (wrong magic or version, short file, trailing bytes, CRC
/// mismatch, undecodable payload) is reported as [`PersistError::Corrupt`].
pub struct PersistenceAdapter<T> {
    /// Path to the backing file.
    path: PathBuf,
    /// The bound root object, if any.
    value: Option<T>,
    /// Set when the bound object may differ from what is on disk.
    dirty: bool,
    sync_mode: SyncMode,
}

impl<T> PersistenceAdapter<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create an adapter for the file at `path`. No I/O happens here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            value: None,
            dirty: false,
            sync_mode: SyncMode::default(),
        }
    }

    /// Use a different flush strategy for saves.
    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if something is present at the backing path.
    ///
    /// Only a missing path counts as absent. Any other stat failure (a
    /// permission error, a file where a directory should be) is returned,
    /// so callers never mistake an unreadable file for a fresh start.
    pub fn exists(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Decode the backing file without binding the result.
    pub fn read(&self) -> Result<T> {
        let bytes = fs::read(&self.path)?;
        let value = decode(&bytes).map_err(|reason| PersistError::Corrupt {
            path: self.path.clone(),
            reason,
        })?;
        debug!(path = %self.path.display(), len = bytes.len(), "loaded data file");
        Ok(value)
    }

    /// Decode the backing file and bind the result as the root object.
    ///
    /// A freshly loaded object is clean: saving it again is not required.
    pub fn load(&mut self) -> Result<&mut T> {
        let value = self.read()?;
        self.dirty = false;
        Ok(self.value.insert(value))
    }

    /// Bind `value` as the root object to be written by the next save.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.dirty = true;
    }

    /// The bound root object, if any.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutable access to the bound root object. Marks the adapter dirty.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let value = self.value.as_mut()?;
        self.dirty = true;
        Some(value)
    }

    /// Returns `true` if a value is bound.
    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` if the bound object has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the bound object to the backing file.
    ///
    /// The frame is written to `<path>.tmp` and renamed over `<path>`, so
    /// readers only ever see the old or the new file. The parent directory is
    /// created if it does not exist yet.
    pub fn save(&mut self) -> Result<()> {
        let value = self
            .value
            .as_ref()
            .ok_or_else(|| PersistError::Unbound(self.path.clone()))?;

        let payload =
            bincode::serialize(value).map_err(|e| PersistError::Serialization(e.to_string()))?;
        let frame = encode(&payload)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        if let Err(e) = write_file(&tmp_path, &frame, self.sync_mode) {
            if tmp_path.is_file() {
                let _ = fs::remove_file(&tmp_path);
            }
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        self.dirty = false;
        debug!(path = %self.path.display(), len = frame.len(), "saved data file");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl<T> std::fmt::Debug for PersistenceAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("path", &self.path)
            .field("bound", &self.value.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

fn write_file(path: &Path, bytes: &[u8], sync_mode: SyncMode) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    if sync_mode == SyncMode::Full {
        writer.get_ref().sync_all()?;
    }
    Ok(())
}

fn encode(payload: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(payload.len()).map_err(|_| {
        PersistError::Serialization(format!("payload too large: {} bytes", payload.len()))
    })?;
    let crc = crc32fast::hash(payload);

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(&MAGIC);
    frame.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(&crc.to_le_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, String> {
    if bytes.len() < HEADER_SIZE {
        return Err(format!(
            "file is {} bytes, shorter than the {HEADER_SIZE}-byte header",
            bytes.len()
        ));
    }

    let (header, payload) = bytes.split_at(HEADER_SIZE);
    if header[0..4] != MAGIC {
        return Err("bad magic".into());
    }

    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != FORMAT_VERSION {
        return Err(format!("unsupported format version {version}"));
    }

    let length = u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
    let expected_crc = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);

    if payload.len() != length {
        warn!(expected = length, actual = payload.len(), "payload length mismatch");
        return Err(format!(
            "payload length mismatch: header says {length}, found {}",
            payload.len()
        ));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        warn!(expected = expected_crc, actual = actual_crc, "CRC mismatch");
        return Err(format!(
            "CRC mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"
        ));
    }

    bincode::deserialize(payload).map_err(|e| format!("undecodable payload: {e}"))
}
