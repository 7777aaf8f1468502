//! Cross-file duplicate detection over whitespace-normalized digests.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::blocks::BlockScanner;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    File,
    Block,
}

impl DuplicateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateKind::File => "file",
            DuplicateKind::Block => "block",
        }
    }
}

/// One member location of a duplicate group. File groups carry no line
/// range; block groups carry 1-based inclusive bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuplicateMember {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub kind: DuplicateKind,
    pub members: Vec<DuplicateMember>,
    pub message: String,
}

impl DuplicateGroup {
    /// Distinct member files, sorted.
    pub fn files(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.members.iter().map(|m| m.file.as_str()).collect();
        set.into_iter().collect()
    }
}

/// Digest of content with every whitespace run collapsed to a single space.
/// Formatting-only differences hash identically; renamed identifiers do not.
pub fn normalized_digest(content: &str) -> String {
    let normalized = content.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{:x}", Sha256::digest(normalized.as_bytes()))
}

#[derive(Clone, Debug)]
struct BlockRecord {
    file: String,
    start_line: usize,
    end_line: usize,
}

/// Accumulator for the whole run. Registration happens per file during the
/// pipeline fold; `find_duplicates` runs once afterwards. Partial indexes
/// built independently reduce with `merge`.
#[derive(Default)]
pub struct DuplicateIndex {
    file_digests: BTreeMap<String, Vec<String>>,
    block_digests: BTreeMap<String, Vec<BlockRecord>>,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: &str, content: &str, scanner: &dyn BlockScanner) {
        let digest = normalized_digest(content);
        self.file_digests.entry(digest).or_default().push(path.to_string());

        for block in scanner.scan(content) {
            let digest = normalized_digest(&block.content);
            self.block_digests.entry(digest).or_default().push(BlockRecord {
                file: path.to_string(),
                start_line: block.start_line,
                end_line: block.end_line,
            });
        }
    }

    /// Fold another index into this one. Group output is order-independent:
    /// merging partial indexes yields the same duplicates as registering
    /// every file into a single index.
    pub fn merge(&mut self, other: DuplicateIndex) {
        for (digest, mut paths) in other.file_digests {
            self.file_digests.entry(digest).or_default().append(&mut paths);
        }
        for (digest, mut records) in other.block_digests {
            self.block_digests.entry(digest).or_default().append(&mut records);
        }
    }

    /// All duplicate groups spanning at least two distinct files.
    pub fn find_duplicates(&self) -> Vec<DuplicateGroup> {
        let mut file_groups = Vec::new();
        for paths in self.file_digests.values() {
            let distinct: BTreeSet<&String> = paths.iter().collect();
            if distinct.len() > 1 {
                file_groups.push(DuplicateGroup {
                    kind: DuplicateKind::File,
                    members: distinct
                        .iter()
                        .map(|file| DuplicateMember {
                            file: (*file).clone(),
                            start_line: None,
                            end_line: None,
                        })
                        .collect(),
                    message: format!("{} identical files", distinct.len()),
                });
            }
        }
        file_groups.sort_by(|a, b| a.members[0].file.cmp(&b.members[0].file));

        let mut block_groups = Vec::new();
        for records in self.block_digests.values() {
            let distinct_files: BTreeSet<&String> = records.iter().map(|r| &r.file).collect();
            if records.len() > 1 && distinct_files.len() > 1 {
                let mut members: Vec<DuplicateMember> = records
                    .iter()
                    .map(|r| DuplicateMember {
                        file: r.file.clone(),
                        start_line: Some(r.start_line),
                        end_line: Some(r.end_line),
                    })
                    .collect();
                members.sort_by(|a, b| (&a.file, a.start_line).cmp(&(&b.file, b.start_line)));
                block_groups.push(DuplicateGroup {
                    kind: DuplicateKind::Block,
                    members,
                    message: format!(
                        "{} duplicated code blocks across {} files",
                        records.len(),
                        distinct_files.len()
                    ),
                });
            }
        }
        block_groups.sort_by(|a, b| a.members[0].file.cmp(&b.members[0].file));

        file_groups.extend(block_groups);
        file_groups
    }
}
