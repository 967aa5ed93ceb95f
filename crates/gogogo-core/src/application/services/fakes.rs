//! Test doubles shared by the service tests.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::error::{RenderError, SourceError};
use crate::application::ports::{ContentRenderer, Filesystem, PhaseObserver, TemplateSource};
use crate::domain::{Phase, ProjectContext, RelativePath, TemplateEntry};

/// Returns its input and remembers what it was given.
#[derive(Default)]
pub struct RecordingEngine {
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingEngine {
    pub fn seen(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.seen)
    }
}

impl ContentRenderer for RecordingEngine {
    fn render(
        &self,
        _name: &str,
        content: &[u8],
        _context: &ProjectContext,
    ) -> Result<Vec<u8>, RenderError> {
        self.seen
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(content).into_owned());
        Ok(content.to_vec())
    }
}

pub struct FailingEngine;

impl ContentRenderer for FailingEngine {
    fn render(
        &self,
        name: &str,
        _content: &[u8],
        _context: &ProjectContext,
    ) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::ParseError {
            path: name.to_string(),
            cause: "line 1: unterminated placeholder".into(),
        })
    }
}

/// Template tree held in a map; `None` marks a directory.
#[derive(Default)]
pub struct FakeSource {
    entries: BTreeMap<String, Option<Vec<u8>>>,
}

impl FakeSource {
    pub fn dir(mut self, path: &str) -> Self {
        self.entries.insert(path.to_string(), None);
        self
    }

    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.entries
            .insert(path.to_string(), Some(content.as_bytes().to_vec()));
        self
    }
}

impl TemplateSource for FakeSource {
    fn entries(&self) -> Result<Vec<TemplateEntry>, SourceError> {
        // Reverse order so callers must sort.
        self.entries
            .iter()
            .rev()
            .map(|(path, content)| {
                let path = RelativePath::try_new(path)
                    .map_err(|e| SourceError::new(path.clone(), e.to_string()))?;
                Ok(match content {
                    None => TemplateEntry::directory(path),
                    Some(_) => TemplateEntry::file(path),
                })
            })
            .collect()
    }

    fn read(&self, path: &RelativePath) -> Result<Vec<u8>, SourceError> {
        match self.entries.get(&path.to_slash_string()) {
            Some(Some(content)) => Ok(content.clone()),
            _ => Err(SourceError::new(path.to_slash_string(), "not a file")),
        }
    }
}

/// Filesystem that records every call and can be told to fail on one path.
#[derive(Default)]
pub struct RecordingFs {
    pub ops: Mutex<Vec<String>>,
    pub files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    pub dirs: Mutex<BTreeSet<PathBuf>>,
    fail_on: Option<PathBuf>,
}

impl RecordingFs {
    pub fn failing_on(path: impl Into<PathBuf>) -> Self {
        Self {
            fail_on: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        Ok(())
    }
}

impl Filesystem for RecordingFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        self.ops
            .lock()
            .unwrap()
            .push(format!("mkdir {}", path.display()));
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        self.check(path)?;
        self.ops
            .lock()
            .unwrap()
            .push(format!("write {}", path.display()));
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        self.write_file(path, b"")?;
        Ok(Box::new(io::sink()))
    }

    fn set_executable(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }
}

/// Records every notification as `"entered:<phase>"` / `"failed:<phase>"`.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl PhaseObserver for RecordingObserver {
    fn entered(&self, phase: Phase) {
        self.events.lock().unwrap().push(format!("entered:{phase}"));
    }

    fn failed(&self, phase: Phase) {
        self.events.lock().unwrap().push(format!("failed:{phase}"));
    }
}
