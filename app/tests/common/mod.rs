#![allow(dead_code)]

use app::sync::Prompt;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use storage::{EntryKind, Storage, StorageError};
use walkdir::WalkDir;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a tree under `root`; names ending in `/` are directories,
/// everything else is a file whose content is its own relative path.
pub fn create_tree(root: &Path, entries: &[&str]) {
    for entry in entries {
        if let Some(dir) = entry.strip_suffix('/') {
            fs::create_dir_all(root.join(dir)).unwrap();
        } else {
            let path = root.join(entry);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, entry.as_bytes()).unwrap();
        }
    }
}

/// Relative path -> file content (`None` for directories), root excluded.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| entry.unwrap())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let content = if entry.file_type().is_dir() {
                None
            } else {
                Some(fs::read(entry.path()).unwrap())
            };
            (relative, content)
        })
        .collect()
}

/// Relative paths of everything under `root`, root excluded.
pub fn relative_paths(root: &Path) -> BTreeSet<PathBuf> {
    snapshot(root).into_keys().collect()
}

pub fn top_level_names(root: &Path) -> BTreeSet<String> {
    fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

/// Prompt answering from a fixed script and remembering every question.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }

    /// A prompt that must never be asked.
    pub fn silent() -> Self {
        Self::default()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> io::Result<bool> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => panic!("unexpected confirmation prompt: {}", message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    File(u64),
    Dir,
}

/// In-memory tree with declared file sizes, for exercising size-dependent
/// behavior without writing gigabytes to disk.
#[derive(Debug)]
pub struct MemoryStorage {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);
        Self {
            nodes: RefCell::new(nodes),
        }
    }

    /// Add a directory and any missing parents.
    pub fn dir(&self, path: &str) -> &Self {
        let path = Path::new(path);
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes
                .borrow_mut()
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
        self
    }

    /// Add a file of `size` bytes, creating its parents.
    pub fn file(&self, path: &str, size: u64) -> &Self {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            self.dir(&parent.to_string_lossy());
        }
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::File(size));
        self
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.borrow().contains_key(Path::new(path))
    }

    pub fn paths_under(&self, root: &str) -> Vec<PathBuf> {
        let root = Path::new(root);
        self.nodes
            .borrow()
            .keys()
            .filter(|p| p.starts_with(root) && p.as_path() != root)
            .cloned()
            .collect()
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.nodes.borrow().get(path).copied()
    }

    fn not_found(path: &Path) -> StorageError {
        StorageError::io(path, io::Error::new(io::ErrorKind::NotFound, "no such entry"))
    }

    fn require_parent_dir(&self, path: &Path) -> storage::Result<()> {
        match path.parent().and_then(|parent| self.node(parent)) {
            Some(Node::Dir) => Ok(()),
            _ => Err(Self::not_found(path)),
        }
    }
}

impl Storage for MemoryStorage {
    fn list_directory(&self, path: &Path) -> storage::Result<BTreeSet<OsString>> {
        if self.node(path) != Some(Node::Dir) {
            return Err(Self::not_found(path));
        }
        Ok(self
            .nodes
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
            .collect())
    }

    fn kind(&self, path: &Path) -> EntryKind {
        match self.node(path) {
            Some(Node::File(_)) => EntryKind::File,
            Some(Node::Dir) => EntryKind::Directory,
            None => EntryKind::Missing,
        }
    }

    fn file_size(&self, path: &Path) -> storage::Result<u64> {
        match self.node(path) {
            Some(Node::File(size)) => Ok(size),
            _ => Err(Self::not_found(path)),
        }
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> storage::Result<()> {
        let size = self.file_size(src)?;
        self.require_parent_dir(dst)?;
        self.nodes.borrow_mut().insert(dst.to_path_buf(), Node::File(size));
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> storage::Result<()> {
        if self.node(path).is_some() {
            return Err(StorageError::DestinationExists(path.to_path_buf()));
        }
        self.require_parent_dir(path)?;
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Dir);
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> storage::Result<()> {
        match self.node(path) {
            Some(Node::File(_)) => {
                self.nodes.borrow_mut().remove(path);
                Ok(())
            }
            _ => Err(Self::not_found(path)),
        }
    }

    fn delete_directory_recursive(&self, path: &Path) -> storage::Result<()> {
        if self.node(path) != Some(Node::Dir) {
            return Err(Self::not_found(path));
        }
        self.nodes.borrow_mut().retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
