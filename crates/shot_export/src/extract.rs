//! Event extractor
//!
//! Loads event files one at a time and accumulates every shot in order.
//! Nothing here touches the output path; a failure at any point simply
//! drops the collector.

use std::fs;
use std::path::Path;

use crate::config::MissingFieldPolicy;
use crate::error::{ExtractError, Result};
use crate::event::{RawEvent, ShotRecord};

/// Parse one event file into its ordered list of events.
///
/// Bytes are handed to serde_json directly, so invalid UTF-8 is reported
/// as a parse error rather than an IO error.
pub fn load_event_file(path: &Path) -> Result<Vec<RawEvent>> {
    let data = fs::read(path).map_err(|e| ExtractError::from_file_read(path, e))?;
    serde_json::from_slice(&data).map_err(|source| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Shots found in one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileStats {
    pub events: usize,
    pub shots: usize,
    pub skipped: usize,
}

/// Finished accumulator, handed to the writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotCollection {
    pub shots: Vec<ShotRecord>,
    pub files: usize,
    pub events: usize,
    pub skipped: usize,
}

impl ShotCollection {
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn goals(&self) -> usize {
        self.shots.iter().filter(|s| s.is_goal).count()
    }
}

/// Append-only shot accumulator.
#[derive(Debug)]
pub struct ShotCollector {
    policy: MissingFieldPolicy,
    collection: ShotCollection,
}

impl ShotCollector {
    pub fn new(policy: MissingFieldPolicy) -> Self {
        Self { policy, collection: ShotCollection::default() }
    }

    /// Load `path` and append its shots.
    pub fn extract_file(&mut self, path: &Path) -> Result<FileStats> {
        let events = load_event_file(path)?;
        let stats = self.extract_events(path, &events)?;

        log::debug!(
            "{:?}: {} events, {} shots, {} skipped",
            path,
            stats.events,
            stats.shots,
            stats.skipped
        );
        Ok(stats)
    }

    /// Append the shots of an already parsed file. `path` is only used for
    /// error context.
    pub fn extract_events(&mut self, path: &Path, events: &[RawEvent]) -> Result<FileStats> {
        let mut stats = FileStats { events: events.len(), ..FileStats::default() };

        for (index, event) in events.iter().enumerate() {
            // An event without a type cannot be classified; fatal under any policy.
            if !event.is_shot().map_err(|e| e.at(path, index))? {
                continue;
            }

            match ShotRecord::from_shot_event(event) {
                Ok(shot) => {
                    self.collection.shots.push(shot);
                    stats.shots += 1;
                }
                Err(e) => {
                    let err = e.at(path, index);
                    if self.policy == MissingFieldPolicy::Skip && err.is_shot_field_error() {
                        log::warn!("Skipping shot: {}", err);
                        stats.skipped += 1;
                    } else {
                        return Err(err);
                    }
                }
            }
        }

        self.collection.files += 1;
        self.collection.events += stats.events;
        self.collection.skipped += stats.skipped;
        Ok(stats)
    }

    pub fn shot_count(&self) -> usize {
        self.collection.shots.len()
    }

    pub fn finish(self) -> ShotCollection {
        self.collection
    }
}

/// Run the extractor over every file, in the given order.
pub fn extract_shots<P: AsRef<Path>>(
    files: &[P],
    policy: MissingFieldPolicy,
) -> Result<ShotCollection> {
    let mut collector = ShotCollector::new(policy);
    for file in files {
        collector.extract_file(file.as_ref())?;
    }
    Ok(collector.finish())
}
