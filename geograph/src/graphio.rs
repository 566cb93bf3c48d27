//! Plaintext graph reading and writing.
//!
//! A graph is a pair of files. The adjacency file holds one entry per
//! vertex:
//!
//! ```text
//! 0 : { 1, 2, 5 }
//! 1 : { 0, 1 }
//! ```
//!
//! where a neighbor list may continue over several lines until its closing
//! brace. The group file assigns one label per vertex:
//!
//! ```text
//! 0 : 2
//! 1 : 0
//! ```
//!
//! Entries are expected in index order; the loader rejects anything it
//! cannot account for instead of guessing.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bstr::ByteSlice;
use thiserror::Error;

use crate::scanner::{fields, parse_u32};
use crate::store::{MemoryStore, Vertex, VertexRecord};

const BUFSIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("graph file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("{adjacency} adjacency entries but {groups} group entries")]
    Mismatch { adjacency: usize, groups: usize },
    #[error("vertex {vertex} lists neighbor {neighbor} outside the graph of {size} vertices")]
    NeighborRange {
        vertex: Vertex,
        neighbor: Vertex,
        size: usize,
    },
}

/// Loads an adjacency/group file pair into a [`MemoryStore`].
pub fn read(adj_path: &Path, group_path: &Path) -> Result<MemoryStore, LoadError> {
    let neighbors = parse_adjacency(adj_path)?;
    let groups = parse_groups(group_path)?;
    if neighbors.len() != groups.len() {
        return Err(LoadError::Mismatch {
            adjacency: neighbors.len(),
            groups: groups.len(),
        });
    }

    let size = neighbors.len();
    let records: Vec<VertexRecord> = neighbors
        .into_iter()
        .zip(groups.into_iter())
        .enumerate()
        .map(|(index, (neighbors, group))| VertexRecord {
            index: index as Vertex,
            group,
            neighbors,
        })
        .collect();
    for record in &records {
        for &neighbor in &record.neighbors {
            if neighbor as usize >= size {
                return Err(LoadError::NeighborRange {
                    vertex: record.index,
                    neighbor,
                    size,
                });
            }
        }
    }
    Ok(MemoryStore::new(records))
}

/// Writes records as an adjacency/group file pair loadable by [`read`].
pub fn write(
    records: &[VertexRecord],
    adj_path: &Path,
    group_path: &Path,
) -> Result<(), std::io::Error> {
    let mut adj = BufWriter::with_capacity(BUFSIZE, File::create(adj_path)?);
    for record in records {
        write!(adj, "{} : {{", record.index)?;
        for (i, neighbor) in record.neighbors.iter().enumerate() {
            if i > 0 {
                write!(adj, ",")?;
            }
            write!(adj, " {}", neighbor)?;
        }
        writeln!(adj, " }}")?;
    }
    adj.flush()?;

    let mut grp = BufWriter::with_capacity(BUFSIZE, File::create(group_path)?);
    for record in records {
        writeln!(grp, "{} : {}", record.index, record.group)?;
    }
    grp.flush()
}

fn parse_adjacency(path: &Path) -> Result<Vec<Vec<Vertex>>, LoadError> {
    let reader = BufReader::with_capacity(BUFSIZE, File::open(path)?);
    let mut lists: Vec<Vec<Vertex>> = Vec::new();
    // a list spans lines until its closing brace
    let mut open: Option<Vec<Vertex>> = None;
    for (lineno, line) in reader.split(b'\n').enumerate() {
        let lineno = lineno + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut rest: &[u8] = line;
        let mut list = match open.take() {
            Some(list) => list,
            None => {
                // leading "index :" is optional; when present it must agree
                // with the entry's position
                if let Some(pos) = rest.find_byte(b':') {
                    let declared = rest[..pos].trim();
                    if !declared.is_empty() {
                        let declared = parse_u32(declared).ok_or_else(|| LoadError::Parse {
                            line: lineno,
                            reason: format!("bad vertex index {:?}", declared.as_bstr()),
                        })?;
                        if declared as usize != lists.len() {
                            return Err(LoadError::Parse {
                                line: lineno,
                                reason: format!(
                                    "vertex {} out of order, expected {}",
                                    declared,
                                    lists.len()
                                ),
                            });
                        }
                    }
                    rest = &rest[pos + 1..];
                }
                Vec::new()
            }
        };

        let closed = rest.trim().ends_with(b"}");
        for word in fields(rest, b',') {
            let word = strip_braces(word);
            if word.is_empty() {
                continue;
            }
            let neighbor = parse_u32(word).ok_or_else(|| LoadError::Parse {
                line: lineno,
                reason: format!("bad neighbor {:?}", word.as_bstr()),
            })?;
            list.push(neighbor);
        }
        if closed {
            lists.push(list);
        } else {
            open = Some(list);
        }
    }
    if open.is_some() {
        return Err(LoadError::Parse {
            line: 0,
            reason: "unterminated adjacency list".to_string(),
        });
    }
    Ok(lists)
}

fn parse_groups(path: &Path) -> Result<Vec<u32>, LoadError> {
    let reader = BufReader::with_capacity(BUFSIZE, File::open(path)?);
    let mut groups = Vec::new();
    for (lineno, line) in reader.split(b'\n').enumerate() {
        let lineno = lineno + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let pos = line.find_byte(b':').ok_or_else(|| LoadError::Parse {
            line: lineno,
            reason: "expected `index : group`".to_string(),
        })?;
        let declared = parse_u32(&line[..pos]).ok_or_else(|| LoadError::Parse {
            line: lineno,
            reason: format!("bad vertex index {:?}", line[..pos].as_bstr()),
        })?;
        if declared as usize != groups.len() {
            return Err(LoadError::Parse {
                line: lineno,
                reason: format!("vertex {} out of order, expected {}", declared, groups.len()),
            });
        }
        let group = parse_u32(&line[pos + 1..]).ok_or_else(|| LoadError::Parse {
            line: lineno,
            reason: format!("bad group {:?}", line[pos + 1..].as_bstr()),
        })?;
        groups.push(group);
    }
    Ok(groups)
}

fn strip_braces(word: &[u8]) -> &[u8] {
    let word = word.trim();
    let word = word.strip_prefix(b"{").unwrap_or(word);
    let word = word.strip_suffix(b"}").unwrap_or(word);
    word.trim()
}
