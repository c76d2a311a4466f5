//! Directories synthesized from slash-delimited file names.
//!
//! Nothing about directories is persisted. A directory exists while at least one
//! used slot's name starts with its path and a `/`, and its listing is rebuilt by
//! scanning the table on every resolution. Children keep the table's slot order.
//! A name ending in `/` (e.g. `"a/"`) makes `a` an existing, possibly empty directory.
//! Names that are not valid UTF-8 are left out.

use std::collections::HashSet;

use log::debug;

use crate::config::*;
use crate::container::Container;
use crate::path::{base_name, dir_prefix};
use crate::structs::Metadata;
use crate::Result;

/// An immediate child of a synthesized directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File {
        name: String,
        size: u64,
    },
    Directory {
        name: String,
    },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::File { name, .. } | Node::Directory { name } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    pub fn metadata(&self) -> Metadata {
        match self {
            Node::File { name, size } => Metadata::file(name.clone(), *size),
            Node::Directory { name } => Metadata::directory(name.clone()),
        }
    }
}

/// Reported file size: whole blocks, the format keeps no byte count.
pub fn file_size(container: &Container, slot: usize, first_block: u16) -> Result<u64> {
    Ok(container.chain_len(slot, first_block)? as u64 * BLOCK_SIZE as u64)
}

/// One page of a directory listing. `eof` is set once a bounded request finds nothing left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirBatch {
    pub entries: Vec<Metadata>,
    pub eof: bool,
}

/// A synthesized directory with its own pagination cursor.
#[derive(Debug, Clone)]
pub struct Directory {
    path: String,
    children: Vec<Node>,
    returned: usize,
}

impl Directory {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::directory(base_name(&self.path))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// `n == 0` returns every remaining child and never reports `eof`.
    /// `n > 0` returns up to `n` more; with none left it returns nothing and `eof`.
    pub fn read_dir(&mut self, n: usize) -> DirBatch {
        let left = self.children.len() - self.returned;
        if n > 0 && left == 0 {
            return DirBatch {
                entries: Vec::new(),
                eof: true,
            };
        }
        let take = if n == 0 { left } else { n.min(left) };
        let entries = self.children[self.returned..self.returned + take]
            .iter()
            .map(Node::metadata)
            .collect();
        self.returned += take;
        DirBatch {
            entries,
            eof: false,
        }
    }
}

/// Builds the directory at the normalized path `dir`, or `None` when no name lies below it.
pub fn synthesize(container: &Container, dir: &str) -> Result<Option<Directory>> {
    let prefix = dir_prefix(dir);
    let mut found = false;
    let mut children = Vec::new();
    let mut seen_dirs = HashSet::new();

    for (slot, entry) in container.used_entries() {
        let Ok(name) = core::str::from_utf8(entry.name_bytes()) else {
            continue;
        };
        let Some(rest) = name.strip_prefix(prefix.as_str()) else {
            continue;
        };
        found = true;
        if rest.is_empty() {
            // "dir/" itself: proves the directory, names no child
            continue;
        }
        match rest.split_once('/') {
            Some((sub_dir, _)) => {
                if seen_dirs.insert(sub_dir) {
                    children.push(Node::Directory {
                        name: sub_dir.to_string(),
                    });
                }
            }
            None => children.push(Node::File {
                name: rest.to_string(),
                size: file_size(container, slot, entry.first_block)?,
            }),
        }
    }

    debug!("synthesized {:?}: {} children", dir, children.len());
    if !found {
        return Ok(None);
    }
    Ok(Some(Directory {
        path: dir.to_string(),
        children,
        returned: 0,
    }))
}
