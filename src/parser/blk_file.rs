use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use std::fs::{self, DirEntry, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// The block byte source: one raw `.dat` file, or every `blkNNNN.dat`
/// under a directory, ordered by file index and treated as a single
/// logical stream.
#[derive(Debug, Clone)]
pub struct BlkFile {
    files: Vec<PathBuf>,
    total_size: u64,
}

impl BlkFile {
    pub(crate) fn new(path: &Path) -> OpResult<BlkFile> {
        let files = if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            BlkFile::scan_path(path)?
        };
        let mut total_size = 0;
        for file in &files {
            total_size += fs::metadata(file)?.len();
        }
        Ok(BlkFile { files, total_size })
    }

    pub(crate) fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    pub(crate) fn total_size(&self) -> u64 {
        self.total_size
    }

    pub(crate) fn open(path: &Path) -> OpResult<BufReader<File>> {
        Ok(BufReader::new(File::open(path)?))
    }

    fn scan_path(path: &Path) -> OpResult<Vec<PathBuf>> {
        let mut collected = Vec::with_capacity(4000);
        for entry in fs::read_dir(path)? {
            match entry {
                Ok(de) => {
                    let path = BlkFile::resolve_path(&de)?;
                    if !path.is_file() {
                        continue;
                    };
                    if let Some(file_name) = path.as_path().file_name() {
                        if let Some(file_name) = file_name.to_str() {
                            if let Some(index) = BlkFile::parse_blk_index(file_name) {
                                collected.push((index, path));
                            }
                        }
                    }
                }
                Err(msg) => {
                    return Err(OpError::from(msg));
                }
            }
        }
        if collected.is_empty() {
            Err(OpError::new(OpErrorKind::RuntimeError).join_msg("No blk files found!"))
        } else {
            collected.sort_by_key(|(index, _)| *index);
            Ok(collected.into_iter().map(|(_, path)| path).collect())
        }
    }

    fn resolve_path(entry: &DirEntry) -> io::Result<PathBuf> {
        if entry.file_type()?.is_symlink() {
            fs::read_link(entry.path())
        } else {
            Ok(entry.path())
        }
    }

    fn parse_blk_index(file_name: &str) -> Option<i32> {
        let prefix = "blk";
        let ext = ".dat";
        if file_name.starts_with(prefix) && file_name.ends_with(ext) {
            file_name[prefix.len()..(file_name.len() - ext.len())]
                .parse::<i32>()
                .ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blk_index() {
        assert_eq!(0, BlkFile::parse_blk_index("blk00000.dat").unwrap());
        assert_eq!(1, BlkFile::parse_blk_index("blk0001.dat").unwrap());
        assert_eq!(6, BlkFile::parse_blk_index("blk6.dat").unwrap());
        assert_eq!(1202, BlkFile::parse_blk_index("blk1202.dat").unwrap());
        assert_eq!(
            13412451,
            BlkFile::parse_blk_index("blk13412451.dat").unwrap()
        );
        assert_eq!(true, BlkFile::parse_blk_index("blkindex.dat").is_none());
        assert_eq!(true, BlkFile::parse_blk_index("invalid.dat").is_none());
    }
}
