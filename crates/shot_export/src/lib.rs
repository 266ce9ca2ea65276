//! Shot Export Library
//!
//! 경기 이벤트 JSON → 슈팅 테이블 (`goal,X,Y`)
//! 디렉터리 목록 → 슈팅 필터/투영 → 구분자 파일

pub mod config;
pub mod error;
pub mod event;
pub mod extract;
pub mod source;
pub mod writer;

use serde::Serialize;
use std::path::PathBuf;

pub use config::{EntryOrder, ExtractConfig, LineEnding, MissingFieldPolicy, OutputFormat, WriteOptions};
pub use error::{ExtractError, Result};
pub use event::{RawEvent, ShotRecord, GOAL_OUTCOME_ID, SHOT_EVENT_TYPE_ID};
pub use extract::{extract_shots, load_event_file, FileStats, ShotCollection, ShotCollector};
pub use source::list_event_files;
pub use writer::{write_shots, WriteReport, HEADER};

/// 실행 결과 요약
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub events_dir: PathBuf,
    pub output: PathBuf,
    pub files: usize,
    pub events: usize,
    pub shots: usize,
    pub goals: usize,
    pub skipped: usize,
    pub bytes: u64,
    /// SHA256 of the output file (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
}

impl RunSummary {
    pub fn new(config: &ExtractConfig, collection: &ShotCollection, report: &WriteReport) -> Self {
        Self {
            events_dir: config.events_dir.clone(),
            output: report.path.clone(),
            files: collection.files,
            events: collection.events,
            shots: collection.len(),
            goals: collection.goals(),
            skipped: collection.skipped,
            bytes: report.bytes,
            checksum: report.checksum.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// 이벤트 파일 목록 + 슈팅 추출 (파일 쓰기 없음)
pub fn load_shots(config: &ExtractConfig) -> Result<ShotCollection> {
    // 1. 디렉터리 목록
    let files = list_event_files(&config.events_dir, config.order)?;

    // 2. 파일별 슈팅 추출
    let collection = extract_shots(&files, config.on_missing)?;

    log::info!(
        "Loaded {} shots ({} goals) from {} files",
        collection.len(),
        collection.goals(),
        collection.files
    );
    Ok(collection)
}

/// 전체 파이프라인 실행: 목록 → 추출 → 쓰기
///
/// # Arguments
///
/// * `config` - 이벤트 디렉터리, 출력 경로, 정책
///
/// # Returns
///
/// 실행 요약. 오류가 나면 출력 경로는 건드리지 않음 (쓰기 실패 시 이전 파일 유지)
pub fn run_pipeline(config: &ExtractConfig) -> Result<RunSummary> {
    let collection = load_shots(config)?;

    // 3. 출력 파일 쓰기
    let report = write_shots(&collection.shots, &config.output, config.write)?;

    log::info!("Wrote {} rows to {:?}", report.rows, report.path);
    Ok(RunSummary::new(config, &collection, &report))
}
