//! CV download - save the resume locally, or open it when saving fails

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::constants::CV_FILE_NAME;

/// Resume shipped inside the binary, used unless a CV path is configured
const BUNDLED_CV: &[u8] = include_bytes!("../../assets/resume.pdf");

#[derive(Debug, Clone, PartialEq)]
pub enum CvOutcome {
    Saved(PathBuf),
    Opened(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum CvError {
    #[error("resume not found at {}", .0.display())]
    Missing(PathBuf),

    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes the resume into the user's downloads directory
#[derive(Clone, Debug)]
pub struct CvDownloader {
    /// Configured CV file; `None` means the bundled resume
    source: Option<PathBuf>,
    target_dir: PathBuf,
}

impl CvDownloader {
    pub fn new(source: Option<PathBuf>) -> Self {
        let target_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_target_dir(source, target_dir)
    }

    pub fn with_target_dir(source: Option<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        CvDownloader {
            source,
            target_dir: target_dir.into(),
        }
    }

    pub fn destination(&self) -> PathBuf {
        self.target_dir.join(CV_FILE_NAME)
    }

    /// Save a copy; if that fails, hand the resume to the system viewer
    pub async fn download(&self) -> Result<CvOutcome, CvError> {
        match self.save().await {
            Ok(path) => Ok(CvOutcome::Saved(path)),
            Err(e) => {
                tracing::warn!(error = %e, source = ?self.source, "Saving resume failed, opening instead");
                self.open().await.map(CvOutcome::Opened)
            }
        }
    }

    async fn save(&self) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.target_dir).await?;
        let dest = self.destination();
        match &self.source {
            Some(path) => {
                tokio::fs::copy(path, &dest).await?;
            }
            None => tokio::fs::write(&dest, BUNDLED_CV).await?,
        }
        Ok(dest)
    }

    async fn open(&self) -> Result<PathBuf, CvError> {
        let path = match &self.source {
            Some(path) if path.is_file() => path.clone(),
            Some(path) => return Err(CvError::Missing(path.clone())),
            None => {
                let path = std::env::temp_dir().join(CV_FILE_NAME);
                tokio::fs::write(&path, BUNDLED_CV)
                    .await
                    .map_err(|source| CvError::Open {
                        path: path.clone(),
                        source,
                    })?;
                path
            }
        };

        launch(opener(&path)).map_err(|source| CvError::Open {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// Platform command that opens a file with its default viewer
fn opener(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Spawn a detached viewer and reap it once it exits
fn launch(mut cmd: Command) -> std::io::Result<JoinHandle<std::io::Result<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(tokio::spawn(async move { child.wait().await }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_download_copies_under_resume_name() {
        let src_dir = tempdir().unwrap();
        let out_dir = tempdir().unwrap();
        let source = src_dir.path().join("ayan ahamed (3).pdf");
        fs::write(&source, b"%PDF-1.4 resume").unwrap();

        let downloader =
            CvDownloader::with_target_dir(Some(source), out_dir.path().join("Downloads"));
        let outcome = downloader.download().await.unwrap();

        let expected = out_dir.path().join("Downloads").join("Ayan_Ahamed_Resume.pdf");
        assert_eq!(outcome, CvOutcome::Saved(expected.clone()));
        assert_eq!(fs::read(expected).unwrap(), b"%PDF-1.4 resume");
    }

    #[tokio::test]
    async fn test_default_config_saves_bundled_resume() {
        let out_dir = tempdir().unwrap();
        let downloader = CvDownloader::with_target_dir(Config::default().cv_path, out_dir.path());

        let outcome = downloader.download().await.unwrap();

        let expected = out_dir.path().join("Ayan_Ahamed_Resume.pdf");
        assert_eq!(outcome, CvOutcome::Saved(expected.clone()));
        let saved = fs::read(expected).unwrap();
        assert!(saved.starts_with(b"%PDF-"));
        assert_eq!(saved, BUNDLED_CV);
    }

    #[tokio::test]
    async fn test_missing_source_is_reported() {
        let dir = tempdir().unwrap();
        let downloader =
            CvDownloader::with_target_dir(Some(dir.path().join("nope.pdf")), dir.path());

        let err = downloader.download().await.unwrap_err();
        assert!(matches!(err, CvError::Missing(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launched_viewer_is_waited_on() {
        let waiter = launch(Command::new("true")).unwrap();
        let status = waiter.await.unwrap().unwrap();
        assert!(status.success());
    }
}
