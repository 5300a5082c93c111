//! Reading scanner output from edge files
//!
//! Input paths may be files or directories. Directories are walked
//! recursively and filtered by file-name globs. Files are parsed in parallel,
//! then ingested one after another in sorted path order so the resulting
//! model does not depend on thread scheduling.
//!
//! Three layouts are understood:
//!
//! - `*.jsonl`: one edge record per line, blank lines ignored
//! - `*.json` holding an array of edge records
//! - `*.json` holding an exported graph (`{"nodes": [...], "edges": [...]}`)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use rayon::prelude::*;
use serde::de::Error as _;
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::constants::input::{DEFAULT_PATTERNS, SKIPPED_DIRS};
use crate::core::{RawEdgeRecord, RelationKind};
use crate::error::TangleError;
use crate::graph::GraphModel;
use crate::progress::ProgressReporter;

/// A record that could not be ingested
#[derive(Debug)]
pub struct Rejection {
    pub file: PathBuf,
    /// One-based line for JSON lines, one-based array position otherwise
    /// (within `nodes` or `edges` for an exported graph)
    pub record: usize,
    pub error: TangleError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}: {}", self.file.display(), self.record, self.error)
    }
}

#[derive(Debug, Default)]
pub struct LoadSummary {
    pub files: usize,
    /// Variables declared by exported graph documents
    pub declared: usize,
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

struct ParsedFile {
    path: PathBuf,
    /// Node ids of an exported graph, by one-based position in `nodes`
    declared: Vec<(usize, Result<String, TangleError>)>,
    records: Vec<(usize, Result<RawEdgeRecord, TangleError>)>,
}

pub struct EdgeLoader {
    patterns: Vec<Pattern>,
}

impl Default for EdgeLoader {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

impl EdgeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `patterns` instead of the defaults when walking directories
    pub fn with_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, TangleError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| TangleError::ConfigurationError {
                    message: format!("invalid file pattern '{}': {e}", p.as_ref()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if patterns.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self { patterns })
    }

    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy())
            .is_some_and(|name| self.patterns.iter().any(|p| p.matches(&name)))
    }

    /// Resolve input paths to the sorted list of edge files they contain
    ///
    /// Files named directly are always included; directory contents must
    /// match one of the patterns.
    pub fn discover(
        &self,
        paths: &[PathBuf],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<PathBuf>, TangleError> {
        let mut files = Vec::new();

        for path in paths {
            let metadata = fs::metadata(path).map_err(|source| TangleError::FileReadError {
                path: path.clone(),
                source,
            })?;

            if metadata.is_file() {
                files.push(path.clone());
                continue;
            }

            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(error = %err, "skipping unreadable directory entry");
                        continue;
                    }
                };

                if let Some(p) = progress {
                    p.checking_path(entry.path());
                }

                if entry.file_type().is_file() && self.matches(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }

        files.sort();
        files.dedup();
        debug!(count = files.len(), "discovered edge files");
        Ok(files)
    }

    /// Parse `files` in parallel and ingest them into `model` in order
    pub fn load_files(
        &self,
        files: &[PathBuf],
        model: &mut GraphModel,
        progress: Option<&ProgressReporter>,
    ) -> Result<LoadSummary, TangleError> {
        let parsed: Vec<Result<ParsedFile, TangleError>> = files
            .par_iter()
            .map(|path| {
                let result = parse_file(path);
                if let Some(p) = progress {
                    p.file_parsed(path);
                }
                result
            })
            .collect();

        let mut summary = LoadSummary {
            files: files.len(),
            ..LoadSummary::default()
        };

        for file in parsed {
            let file = file?;

            for (record, declared) in file.declared {
                match declared.and_then(|name| model.add_variable(&name, None)) {
                    Ok(_) => summary.declared += 1,
                    Err(error) => {
                        warn!(file = %file.path.display(), record, %error, "rejected node");
                        summary.rejected.push(Rejection {
                            file: file.path.clone(),
                            record,
                            error,
                        });
                    }
                }
            }

            for (record, parsed) in file.records {
                match parsed.and_then(|raw| model.ingest(raw)) {
                    Ok(_) => summary.accepted += 1,
                    Err(error) => {
                        warn!(file = %file.path.display(), record, %error, "rejected edge record");
                        summary.rejected.push(Rejection {
                            file: file.path.clone(),
                            record,
                            error,
                        });
                    }
                }
            }
        }

        debug!(
            files = summary.files,
            accepted = summary.accepted,
            rejected = summary.rejected.len(),
            "loaded edge files"
        );
        Ok(summary)
    }

    /// Discover and load in one step
    pub fn load(
        &self,
        paths: &[PathBuf],
        model: &mut GraphModel,
        progress: Option<&ProgressReporter>,
    ) -> Result<LoadSummary, TangleError> {
        let files = self.discover(paths, progress)?;
        self.load_files(&files, model, progress)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.iter().any(|skipped| *skipped == name)
}

fn parse_file(path: &Path) -> Result<ParsedFile, TangleError> {
    let content = fs::read_to_string(path).map_err(|source| TangleError::FileReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let is_jsonl = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

    if is_jsonl {
        Ok(parse_json_lines(path, &content))
    } else {
        parse_json_document(path, &content)
    }
}

fn parse_json_lines(path: &Path, content: &str) -> ParsedFile {
    let records = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let record = serde_json::from_str::<RawEdgeRecord>(line).map_err(|source| {
                TangleError::EdgeFileParse {
                    path: path.to_path_buf(),
                    source,
                }
            });
            (index + 1, record)
        })
        .collect();

    ParsedFile {
        path: path.to_path_buf(),
        declared: Vec::new(),
        records,
    }
}

fn parse_json_document(path: &Path, content: &str) -> Result<ParsedFile, TangleError> {
    let parse_error = |source| TangleError::EdgeFileParse {
        path: path.to_path_buf(),
        source,
    };

    let document: Value = serde_json::from_str(content).map_err(parse_error)?;
    let is_export = matches!(&document, Value::Object(map) if map.contains_key("edges"));

    match document {
        Value::Array(items) => {
            let records = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    let record = serde_json::from_value::<RawEdgeRecord>(item).map_err(parse_error);
                    (index + 1, record)
                })
                .collect();

            Ok(ParsedFile {
                path: path.to_path_buf(),
                declared: Vec::new(),
                records,
            })
        }
        Value::Object(mut map) if is_export => {
            let edges = match map.remove("edges") {
                Some(Value::Array(edges)) => edges,
                _ => {
                    return Err(parse_error(serde_json::Error::custom(
                        "`edges` of an exported graph must be an array",
                    )));
                }
            };
            let nodes = match map.remove("nodes") {
                Some(Value::Array(nodes)) => nodes,
                None | Some(Value::Null) => Vec::new(),
                Some(_) => {
                    return Err(parse_error(serde_json::Error::custom(
                        "`nodes` of an exported graph must be an array",
                    )));
                }
            };

            Ok(ParsedFile {
                path: path.to_path_buf(),
                declared: nodes
                    .iter()
                    .enumerate()
                    .map(|(index, node)| (index + 1, node_id(node)))
                    .collect(),
                records: edges
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let record = serde_json::from_value::<RawEdgeRecord>(item)
                            .map(|mut raw| {
                                raw.kind.get_or_insert_with(|| RelationKind::default().to_string());
                                raw
                            })
                            .map_err(parse_error);
                        (index + 1, record)
                    })
                    .collect(),
            })
        }
        _ => Err(parse_error(serde_json::Error::custom(
            "expected an array of edge records or an exported graph document",
        ))),
    }
}

fn node_id(node: &Value) -> Result<String, TangleError> {
    match node.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(_) => Err(TangleError::MalformedEdge {
            field: "id",
            reason: "node `id` must be a string".to_string(),
        }),
        None => Err(TangleError::missing_field("id")),
    }
}
