// downsize/src/processors/placement.rs
use crate::core::{PlacementKind, ResizeError, Result};
use std::path::{Path, PathBuf};

/// Directory that receives untouched originals in overwrite mode.
pub const BACKUP_DIR: &str = "original";

/// Where one selection entry is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub output: PathBuf,
    /// Copy target for the unmodified source, written before the resize.
    pub backup: Option<PathBuf>,
}

impl Destination {
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.output.as_path()];
        if let Some(backup) = &self.backup {
            paths.push(backup.as_path());
        }
        paths
    }
}

pub struct OutputPlacement {
    root: PathBuf,
    kind: PlacementKind,
    confirm_existing: bool,
}

impl OutputPlacement {
    pub fn new(root: impl Into<PathBuf>, kind: PlacementKind, confirm_existing: bool) -> Self {
        Self {
            root: root.into(),
            kind,
            confirm_existing,
        }
    }

    /// Prepares the target directory once, before any item is processed.
    pub fn prepare(&self) -> Result<()> {
        match &self.kind {
            PlacementKind::Subfolder(name) => {
                let dir = self.root.join(name);
                if !dir.exists() {
                    log::info!("Creating output directory {}", dir.display());
                    std::fs::create_dir_all(&dir)?;
                    return Ok(());
                }

                if !dir.is_dir() {
                    return Err(ResizeError::Configuration(format!(
                        "Output path exists but is not a directory: {}",
                        dir.display()
                    )));
                }

                if !self.confirm_existing {
                    return Err(ResizeError::Configuration(format!(
                        "Directory {} already exists and replacing files was not confirmed",
                        dir.display()
                    )));
                }

                log::warn!("Writing into existing directory {}", dir.display());
                Ok(())
            }
            PlacementKind::Prefix(_) => Ok(()),
            PlacementKind::Overwrite { make_copy: false } => Ok(()),
            PlacementKind::Overwrite { make_copy: true } => {
                let dir = self.root.join(BACKUP_DIR);
                if dir.exists() && !dir.is_dir() {
                    return Err(ResizeError::Configuration(format!(
                        "Backup path exists but is not a directory: {}",
                        dir.display()
                    )));
                }
                std::fs::create_dir_all(&dir)?;
                Ok(())
            }
        }
    }

    pub fn destination_for(&self, filename: &str) -> Destination {
        match &self.kind {
            PlacementKind::Subfolder(name) => Destination {
                output: self.root.join(name).join(filename),
                backup: None,
            },
            PlacementKind::Prefix(prefix) => Destination {
                output: self.root.join(format!("{}{}", prefix, filename)),
                backup: None,
            },
            PlacementKind::Overwrite { make_copy } => Destination {
                output: self.root.join(filename),
                backup: make_copy.then(|| self.root.join(BACKUP_DIR).join(filename)),
            },
        }
    }

    /// Prefixed outputs share the root with the sources, so an existing file
    /// at the output path is never replaced.
    pub fn check_collision(&self, destination: &Destination) -> Result<()> {
        if matches!(self.kind, PlacementKind::Prefix(_)) && destination.output.exists() {
            return Err(ResizeError::ItemWrite {
                path: destination.output.clone(),
                reason: "Destination already exists".to_string(),
            });
        }
        Ok(())
    }
}
