use std::{
    io,
    path::{Path, PathBuf},
};

pub trait FileSystemOperator {
    fn home_dir(&self) -> Option<PathBuf>;
    fn create_dir_all<P: AsRef<Path>>(&self, path: P) -> io::Result<()>;
}

pub struct FileSystemOperations;

impl FileSystemOperator for FileSystemOperations {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn create_dir_all<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
