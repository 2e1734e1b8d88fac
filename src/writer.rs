use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::codec::RecordWriter;
use crate::error::ReduceError;
use crate::tasklog::TaskLog;
use crate::KeyValue;

/// Writes `results` to `path`, in the order given.
///
/// Records go to a temporary sibling first, which is synced and then renamed
/// over `path`. Readers of `path` see either the previous contents or the
/// complete new output, never a partial file. On failure the temporary file
/// is removed.
pub fn write_results(
    path: &Path,
    results: &[KeyValue],
    log: &dyn TaskLog,
) -> Result<(), ReduceError> {
    let tmp = temp_sibling(path);
    match write_temp(&tmp, path, results).and_then(|()| publish(&tmp, path)) {
        Ok(()) => {
            log.info(format_args!(
                "wrote {} results to {}",
                results.len(),
                path.display()
            ));
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&tmp);
            Err(err)
        }
    }
}

fn write_temp(tmp: &Path, path: &Path, results: &[KeyValue]) -> Result<(), ReduceError> {
    let file = File::create(tmp).map_err(|e| ReduceError::encode(path, e))?;
    let mut writer = RecordWriter::new(BufWriter::new(file));
    for kv in results {
        writer.write(kv).map_err(|e| ReduceError::encode(path, e))?;
    }
    let file = writer
        .finish()
        .and_then(|buf| buf.into_inner().map_err(|e| e.into_error()))
        .map_err(|e| ReduceError::encode(path, e))?;
    file.sync_all().map_err(|e| ReduceError::encode(path, e))
}

fn publish(tmp: &Path, path: &Path) -> Result<(), ReduceError> {
    fs::rename(tmp, path).map_err(|e| ReduceError::encode(path, e))
}

/// `dir/name` becomes `dir/.name.<uuid>.tmp`, on the same filesystem so the
/// final rename stays atomic.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", Uuid::new_v4()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_records;
    use crate::error::ErrorKind;
    use crate::tasklog::NullLog;
    use tempfile::TempDir;

    #[test]
    fn writes_all_records_in_order() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("mrtmp.wc-res-0");
        let results = vec![KeyValue::new("a", "3"), KeyValue::new("b", "1")];
        write_results(&out, &results, &NullLog).unwrap();

        let written = decode_records(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(written, results);
        // Only the published file is left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::write(&out, "stale").unwrap();
        write_results(&out, &[], &NullLog).unwrap();
        assert!(fs::read(&out).unwrap().is_empty());
    }

    #[test]
    fn unwritable_destination_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("missing").join("out");
        let err = write_results(&out, &[KeyValue::new("a", "1")], &NullLog).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
        assert!(!out.exists());
    }

    #[test]
    fn temp_file_is_a_hidden_sibling() {
        let tmp = temp_sibling(Path::new("/data/mrtmp.wc-res-3"));
        assert_eq!(tmp.parent(), Some(Path::new("/data")));
        let name = tmp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".mrtmp.wc-res-3."));
        assert!(name.ends_with(".tmp"));
    }
}
