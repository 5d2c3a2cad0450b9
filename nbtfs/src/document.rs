use std::path::Path;
use std::sync::Arc;

use flate2::Compression;
use log::debug;

use crate::cache::PathCache;
use crate::error::{Error, Result};
use crate::path::{self, Entry, EntryKind};
use crate::{de, gzip, ser, Compound, Value};

/// A loaded NBT file served through virtual paths.
///
/// The tree is fixed once the document exists. Every request method takes
/// `&self`, so a single document can be shared between threads handling
/// requests concurrently; only the leaf cache is synchronised.
#[derive(Debug)]
pub struct Document {
    name: String,
    root: Value,
    cache: PathCache,
}

impl Document {
    /// Wrap an already built compound.
    pub fn new(name: impl Into<String>, root: Compound) -> Self {
        Self {
            name: name.into(),
            root: Value::Compound(root),
            cache: PathCache::new(),
        }
    }

    /// Read and decode the file at `path`, which may or may not be gzip
    /// compressed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        debug!("read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(gzip::decompress(data)?.as_slice())
    }

    /// Decode uncompressed NBT. The root tag must be a compound.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut decoder = de::Decoder::new(data);
        let (name, root) = decoder
            .next_named()?
            .ok_or_else(Error::no_root_compound)?;

        if decoder.remaining() > 0 {
            debug!("ignoring {} bytes after root tag", decoder.remaining());
        }

        match root {
            Value::Compound(root) => Ok(Self::new(name, root)),
            _ => Err(Error::no_root_compound()),
        }
    }

    /// The name of the root compound, usually empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root compound as a value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Encode to uncompressed NBT.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        ser::to_bytes(&self.name, &self.root)
    }

    /// Write the document to `path` gzip compressed at a fast level.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path, Compression::fast())
    }

    pub fn save_with(&self, path: impl AsRef<Path>, level: Compression) -> Result<()> {
        let path = path.as_ref();
        let data = gzip::compress(&self.to_bytes()?, level)?;
        std::fs::write(path, &data)?;
        debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Whether `path` is a directory or a file.
    pub fn attributes(&self, path: &str) -> Result<EntryKind> {
        let node = path::resolve(&self.root, path)?;
        Ok(path::kind_of(&node))
    }

    pub fn list_children(&self, path: &str) -> Result<Vec<Entry>> {
        let node = path::resolve(&self.root, path)?;
        path::children(&node).ok_or_else(|| Error::not_a_directory(path))
    }

    /// The text of the leaf at `path`. Renderings are cached per path for
    /// the life of the document.
    pub fn read_leaf(&self, path: &str) -> Result<Arc<str>> {
        let path = path::normalise(path);
        self.cache.get_or_render(&path, || {
            let node = path::resolve(&self.root, &path)?;
            path::render(&node).ok_or_else(|| Error::not_a_leaf(&path))
        })
    }

    pub fn create_file(&self, path: &str) -> Result<()> {
        self.reject("create", path)
    }

    pub fn create_dir(&self, path: &str) -> Result<()> {
        self.reject("mkdir", path)
    }

    pub fn write(&self, path: &str, _data: &[u8]) -> Result<()> {
        self.reject("write", path)
    }

    pub fn remove_file(&self, path: &str) -> Result<()> {
        self.reject("remove", path)
    }

    pub fn remove_dir(&self, path: &str) -> Result<()> {
        self.reject("rmdir", path)
    }

    fn reject(&self, op: &str, path: &str) -> Result<()> {
        debug!("rejected {} of {}", op, path);
        Err(Error::permission_denied(path))
    }
}
