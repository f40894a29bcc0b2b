// Test fixtures - small FARS-shaped accident files written as real .csv.bz2
//
// 2013 (7 rows): months 1,1,2,2,5,5,12; states 1, 6 and 48 (both 48 rows
// carry 99.9999/999.9999 unknown-location codes).
// 2014 (4 rows): months 3,3,5,11; states 1 and 6.

use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const HEADER: &str = "STATE,ST_CASE,MONTH,DAY,LATITUDE,LONGITUD,FATALS";

pub const ROWS_2013: &str = "\
1,10001,1,5,32.6400,-85.3500,1
1,10002,1,9,31.4200,-88.0000,1
1,10003,2,14,99.9999,999.9999,2
6,60001,2,20,34.0500,-118.2400,1
6,60002,5,1,37.7700,-122.4100,3
48,480001,5,3,99.9999,999.9999,1
48,480002,12,25,99.9999,999.9999,1
";

pub const ROWS_2014: &str = "\
1,10001,3,2,33.5200,-86.8000,1
6,60001,3,8,36.7400,-119.7800,2
6,60002,5,19,38.5800,-121.4900,1
6,60003,11,30,32.7200,-117.1600,1
";

/// Write `contents` bzip2-compressed to `dir/name`.
pub fn write_bz2(dir: &Path, name: &str, contents: &str) -> PathBuf {
    write_bz2_bytes(dir, name, contents.as_bytes())
}

/// Same as [`write_bz2`] for contents that are not valid UTF-8.
pub fn write_bz2_bytes(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create fixture file");
    let mut encoder = BzEncoder::new(file, Compression::default());
    encoder
        .write_all(contents)
        .expect("write fixture contents");
    encoder.finish().expect("finish bzip2 stream");
    path
}

/// Write `accident_<year>.csv.bz2` with the standard header and `rows`.
pub fn write_year(dir: &Path, year: i32, rows: &str) -> PathBuf {
    let contents = format!("{}\n{}", HEADER, rows);
    write_bz2(dir, &format!("accident_{}.csv.bz2", year), &contents)
}

/// Temp directory holding the 2013 and 2014 fixture years.
pub fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    write_year(dir.path(), 2013, ROWS_2013);
    write_year(dir.path(), 2014, ROWS_2014);
    dir
}

/// In-memory log sink for asserting on `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Run `f` with a subscriber writing into this capture.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
