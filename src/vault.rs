use crate::{fs::FileSystemOperator, secrets::Secret};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error(r#"The entry "{0}" does not exist!"#)]
    NotFound(String),
    #[error("The vault has not been opened")]
    NotOpen,
    #[error(r#""{0}" is not a valid application name"#)]
    InvalidName(String),
    #[error("The vault at {path} is unavailable: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Encountered IO error when interacting with the vault: {0}")]
    Io(#[from] io::Error),
    #[error("The stored entry could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage for [`Secret`]s keyed by application name.
pub trait Vault {
    fn open(&mut self) -> Result<(), VaultError>;
    fn close(&mut self);
    fn read(&self, application: &str) -> Result<Secret, VaultError>;
    fn upsert(&mut self, secret: &Secret) -> Result<(), VaultError>;
    fn delete(&mut self, application: &str) -> Result<(), VaultError>;
}

/// Keeps each secret as a JSON document named after its application.
pub struct OnDiskVault<F> {
    base_dir: PathBuf,
    fs: F,
    is_open: bool,
}

impl<F: FileSystemOperator> OnDiskVault<F> {
    const ENTRY_POSTFIX: &'static str = ".json";
    const TEMP_POSTFIX: &'static str = ".json.tmp";

    pub fn new<P: Into<PathBuf>>(base_dir: P, fs: F) -> Self {
        Self {
            base_dir: base_dir.into(),
            fs,
            is_open: false,
        }
    }

    fn ensure_open(&self) -> Result<(), VaultError> {
        if self.is_open {
            Ok(())
        } else {
            Err(VaultError::NotOpen)
        }
    }

    fn build_entry_path(&self, application: &str) -> Result<PathBuf, VaultError> {
        self.build_path(application, Self::ENTRY_POSTFIX)
    }

    fn build_path(&self, application: &str, postfix: &str) -> Result<PathBuf, VaultError> {
        let invalid = application.is_empty()
            || application == "."
            || application == ".."
            || application.contains(&['/', '\\', '\0'][..]);
        if invalid {
            return Err(VaultError::InvalidName(application.to_owned()));
        }
        Ok(self
            .base_dir
            .join(format!("{application}{postfix}")))
    }

    fn create_entry_file(path: &Path) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        options.open(path)
    }

    fn write_entry(path: &Path, secret: &Secret) -> Result<(), VaultError> {
        let mut writer = BufWriter::new(Self::create_entry_file(path)?);
        serde_json::to_writer_pretty(&mut writer, secret)?;
        writer.flush()?;
        Ok(())
    }
}

impl<F: FileSystemOperator> Vault for OnDiskVault<F> {
    fn open(&mut self) -> Result<(), VaultError> {
        let unavailable = |source| VaultError::Unavailable {
            path: self.base_dir.display().to_string(),
            source,
        };
        self.fs.create_dir_all(&self.base_dir).map_err(unavailable)?;
        let metadata = fs::metadata(&self.base_dir).map_err(unavailable)?;
        if !metadata.is_dir() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::Other,
                "not a directory",
            )));
        }
        debug!(path = %self.base_dir.display(), "vault opened");
        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) {
        if self.is_open {
            debug!(path = %self.base_dir.display(), "vault closed");
        }
        self.is_open = false;
    }

    fn read(&self, application: &str) -> Result<Secret, VaultError> {
        self.ensure_open()?;
        let path = self.build_entry_path(application)?;
        if !path.exists() {
            return Err(VaultError::NotFound(application.to_owned()));
        }
        let mut buf = Vec::new();
        File::open(&path)?.read_to_end(&mut buf)?;
        debug!(application, "entry read");
        Ok(serde_json::from_slice(&buf)?)
    }

    fn upsert(&mut self, secret: &Secret) -> Result<(), VaultError> {
        self.ensure_open()?;
        let path = self.build_entry_path(&secret.application)?;
        let temp_path = self.build_path(&secret.application, Self::TEMP_POSTFIX)?;
        let written = Self::write_entry(&temp_path, secret)
            .and_then(|()| fs::rename(&temp_path, &path).map_err(VaultError::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        debug!(application = %secret.application, "entry written");
        Ok(())
    }

    fn delete(&mut self, application: &str) -> Result<(), VaultError> {
        self.ensure_open()?;
        let path = self.build_entry_path(application)?;
        if !path.exists() {
            return Err(VaultError::NotFound(application.to_owned()));
        }
        fs::remove_file(path)?;
        debug!(application, "entry removed");
        Ok(())
    }
}
