// src/flatten.rs

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::FlattenError;
use crate::classify::{Span, classify};

lazy_static! {
    static ref INCLUDE_RE: Regex =
        Regex::new(r"include\s*<([^>]+)>\s*").expect("Invalid include pattern");
}

/// Accumulates the three content categories across the include closure of
/// one root file: variable assignments in discovery order, module bodies
/// keyed by name (first definition wins), and the root file's own
/// top-level statements.
pub struct Flattener {
    variables: Vec<String>,
    modules: HashMap<String, String>,
    module_order: Vec<String>,
    statements: Vec<String>,
    visited: HashSet<PathBuf>,
}

impl Flattener {
    pub fn new() -> Self {
        Flattener {
            variables: Vec::new(),
            modules: HashMap::new(),
            module_order: Vec::new(),
            statements: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Breadth-first walk over `root` and everything it transitively
    /// includes, merging each file's content exactly once. Include
    /// targets resolve against the directory of the file naming them;
    /// any unreadable file in the closure aborts the whole walk.
    pub fn process(&mut self, root: &Path) -> Result<(), FlattenError> {
        let root_key = normalize_path(root);
        let mut queue: VecDeque<PathBuf> = VecDeque::new();
        queue.push_back(root.to_path_buf());

        while let Some(path) = queue.pop_front() {
            let key = normalize_path(&path);
            if !self.visited.insert(key.clone()) {
                continue;
            }

            debug!("reading {}", path.display());
            let text = fs::read_to_string(&path).map_err(|e| FlattenError::Read {
                path: path.clone(),
                source: e,
            })?;

            let dir = path.parent().unwrap_or_else(|| Path::new(""));
            for caps in INCLUDE_RE.captures_iter(&text) {
                queue.push_back(resolve_include(&caps[1], dir));
            }

            let stripped = INCLUDE_RE.replace_all(&text, "");
            self.merge(&stripped, key == root_key);
        }
        Ok(())
    }

    /// Fold one file's classified spans into the accumulators. Statement
    /// spans only survive for the root file.
    fn merge(&mut self, text: &str, is_root: bool) {
        for span in classify(text) {
            match span {
                Span::Assignment(line) => self.variables.push(line),
                Span::Module { name, body } => {
                    if !self.modules.contains_key(&name) {
                        self.module_order.push(name.clone());
                        self.modules.insert(name, body);
                    }
                }
                Span::Statement(line) => {
                    if is_root {
                        self.statements.push(line);
                    }
                }
            }
        }
    }

    /// The consolidated document: all variables, then all definitions in
    /// first-seen order, then the root file's statements, with fixed
    /// blank-line separators between the sections.
    pub fn emit(&self) -> String {
        let modules: Vec<&str> = self
            .module_order
            .iter()
            .map(|name| self.modules[name].as_str())
            .collect();
        format!(
            "{}\n\n{}\n\n{}",
            self.variables.join("\n"),
            modules.join("\n\n"),
            self.statements.join("\n")
        )
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Flattener::new()
    }
}

/// Flatten the include closure of `root` into one document.
pub fn flatten_file(root: &Path) -> Result<String, FlattenError> {
    let mut flattener = Flattener::new();
    flattener.process(root)?;
    Ok(flattener.emit())
}

/// Absolute targets are taken as-is; relative ones join the directory of
/// the file whose include is being resolved, not the root's.
fn resolve_include(target: &str, dir: &Path) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        dir.join(target)
    }
}

/// Canonicalize for visited-set identity, so one file reached through
/// different spellings counts as a single visit. Falls back to the path
/// as-is when canonicalization fails; the read that follows reports the
/// real error.
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
