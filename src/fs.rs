use std::io;
use std::path::Path;

use log::debug;

use crate::config::*;
use crate::container::Container;
use crate::directory::{self, DirBatch, Directory, file_size};
use crate::file::{ChainReader, ReadChunk};
use crate::path::{base_name, normalize};
use crate::structs::Metadata;
use crate::{Error, Result};

/// Read-only hierarchical view over a loaded container.
///
/// The container is never mutated after construction, so a `FileSystem` can be
/// shared between threads (e.g. behind an `Arc`) and every handle it hands out
/// borrows it immutably.
#[derive(Debug)]
pub struct FileSystem {
    container: Container,
}

impl FileSystem {
    pub fn new(container: Container) -> Self {
        Self { container }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Container::load(path)?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.container.save(path)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Opens a file or a synthesized directory. Directories win when a name
    /// is both a file and a directory prefix.
    pub fn open(&self, path: &str) -> Result<Handle<'_>> {
        let path = normalize(path)?;
        if let Some(dir) = directory::synthesize(&self.container, path)? {
            debug!("open {:?}: directory", path);
            return Ok(Handle::Dir(dir));
        }
        if let Some((slot, entry)) = self.container.find(path) {
            debug!("open {:?}: slot {}, first block {}", path, slot, entry.first_block);
            let size = file_size(&self.container, slot, entry.first_block)?;
            return Ok(Handle::File(File {
                meta: Metadata::file(base_name(path), size),
                reader: ChainReader::new(&self.container, slot, entry.first_block),
            }));
        }
        Err(Error::NotFound(path.to_string()))
    }

    pub fn stat(&self, path: &str) -> Result<Metadata> {
        Ok(self.open(path)?.stat())
    }

    /// Full listing of the directory at `path`, in table order.
    pub fn read_dir(&self, path: &str) -> Result<Vec<Metadata>> {
        match self.open(path)? {
            Handle::Dir(mut dir) => Ok(dir.read_dir(0).entries),
            Handle::File(_) => Err(Error::NotDirectory(path.to_string())),
        }
    }

    /// Whole content of the file at `path`.
    pub fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let mut handle = self.open(path)?;
        let mut content = Vec::with_capacity(handle.stat().size as usize);
        let mut buf = vec![0; BLOCK_SIZE];
        loop {
            let chunk = handle.read(&mut buf)?;
            content.extend_from_slice(&buf[..chunk.len]);
            if chunk.eof {
                return Ok(content);
            }
        }
    }
}

/// An open regular file.
#[derive(Debug, Clone)]
pub struct File<'a> {
    meta: Metadata,
    reader: ChainReader<'a>,
}

impl File<'_> {
    pub fn stat(&self) -> Metadata {
        self.meta.clone()
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<ReadChunk> {
        self.reader.read(buf)
    }
}

impl io::Read for File<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = self.reader.read(buf).map_err(io::Error::other)?;
        Ok(chunk.len)
    }
}

/// What `open` returns: a read cursor or a listing cursor.
#[derive(Debug)]
pub enum Handle<'a> {
    File(File<'a>),
    Dir(Directory),
}

impl Handle<'_> {
    pub fn stat(&self) -> Metadata {
        match self {
            Handle::File(file) => file.stat(),
            Handle::Dir(dir) => dir.metadata(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Handle::Dir(_))
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<ReadChunk> {
        match self {
            Handle::File(file) => file.read(buf),
            Handle::Dir(dir) => Err(Error::IsDirectory(dir.path().to_string())),
        }
    }

    /// See [`Directory::read_dir`] for the meaning of `n`.
    pub fn read_dir(&mut self, n: usize) -> Result<DirBatch> {
        match self {
            Handle::Dir(dir) => Ok(dir.read_dir(n)),
            Handle::File(file) => Err(Error::NotDirectory(file.meta.name.clone())),
        }
    }

    /// Handles own no resources beyond memory.
    pub fn close(self) -> Result<()> {
        Ok(())
    }
}
