//! Tabular writer
//!
//! Serializes shots as `goal,X,Y` rows. The file is written next to the
//! target and renamed into place, so the output path holds either the
//! previous file or the complete new one.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::WriteOptions;
use crate::error::{ExtractError, Result};
use crate::event::ShotRecord;

/// Column names, in output order
pub const HEADER: [&str; 3] = ["goal", "X", "Y"];

/// What ended up on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: u64,
    /// SHA256 of the written file (hex)
    pub checksum: String,
}

/// Render the header and every shot into an in-memory table.
pub fn render_shots(shots: &[ShotRecord], options: WriteOptions) -> std::io::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.format.delimiter())
        .terminator(options.line_ending.terminator())
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for shot in shots {
        writer.write_record([
            shot.goal_flag().to_string(),
            shot.x.to_string(),
            shot.y.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.to_string()))
}

/// 슈팅 목록을 `path`에 기록 (기존 파일 덮어쓰기)
pub fn write_shots(shots: &[ShotRecord], path: &Path, options: WriteOptions) -> Result<WriteReport> {
    // 1. 메모리에 테이블 생성
    let data = render_shots(shots, options).map_err(|e| ExtractError::write(path, e))?;

    // 2. 출력 디렉터리 생성
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ExtractError::write(parent, e))?;
        }
    }

    // 3. 임시 파일에 쓰고 rename (원자적 교체)
    let temp_path = temp_path_for(path);
    if let Err(e) = write_synced(&temp_path, &data).and_then(|_| fs::rename(&temp_path, path)) {
        fs::remove_file(&temp_path).ok();
        return Err(ExtractError::write(path, e));
    }

    // 4. SHA256 체크섬
    let checksum = format!("{:x}", Sha256::digest(&data));
    log::debug!("Wrote {} bytes to {:?}", data.len(), path);

    Ok(WriteReport {
        path: path.to_path_buf(),
        rows: shots.len(),
        bytes: data.len() as u64,
        checksum,
    })
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.flush()?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LineEnding, OutputFormat};
    use serde_json::Number;
    use tempfile::TempDir;

    fn shot(is_goal: bool, x: Number, y: Number) -> ShotRecord {
        ShotRecord { is_goal, x, y }
    }

    fn float(v: f64) -> Number {
        Number::from_f64(v).unwrap()
    }

    #[test]
    fn test_render_rows() {
        let shots = vec![
            shot(true, float(108.1), float(40.0)),
            shot(false, Number::from(95), Number::from(30)),
        ];

        let data = render_shots(&shots, WriteOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "goal,X,Y\n1,108.1,40.0\n0,95,30\n"
        );
    }

    #[test]
    fn test_render_header_only() {
        let data = render_shots(&[], WriteOptions::default()).unwrap();
        assert_eq!(data, b"goal,X,Y\n");
    }

    #[test]
    fn test_render_tsv_crlf() {
        let options = WriteOptions { format: OutputFormat::Tsv, line_ending: LineEnding::Crlf };
        let data = render_shots(&[shot(true, float(1.5), float(2.5))], options).unwrap();
        assert_eq!(String::from_utf8(data).unwrap(), "goal\tX\tY\r\n1\t1.5\t2.5\r\n");
    }

    #[test]
    fn test_write_overwrites_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested").join("data.csv");

        let first = write_shots(&[shot(true, float(1.0), float(2.0))], &out, WriteOptions::default())
            .unwrap();
        assert_eq!(first.rows, 1);

        let second = write_shots(&[], &out, WriteOptions::default()).unwrap();
        assert_eq!(second.rows, 0);
        assert_ne!(first.checksum, second.checksum);
        assert_eq!(fs::read_to_string(&out).unwrap(), "goal,X,Y\n");
        assert_eq!(second.bytes, 9);
        assert!(!temp_path_for(&out).exists());
    }

    #[test]
    fn test_checksum_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("data.csv");
        let shots = vec![shot(false, float(60.2), float(33.3))];

        let a = write_shots(&shots, &out, WriteOptions::default()).unwrap();
        let b = write_shots(&shots, &out, WriteOptions::default()).unwrap();
        assert_eq!(a.checksum, b.checksum);
        assert_eq!(a.checksum.len(), 64);
    }

    #[test]
    fn test_unwritable_target_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be replaced by a file.
        let out = temp_dir.path().join("taken");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("keep"), "x").unwrap();

        let err = write_shots(&[], &out, WriteOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Write { .. }));
        assert!(!temp_path_for(&out).exists());
    }
}
