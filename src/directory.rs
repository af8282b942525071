use crate::github::content::UploadRequest;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot walk directory {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        cause: walkdir::Error,
    },
    #[error("Cannot read file {} as utf-8 text", path.display())]
    Read {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },
    #[error("Path {} cannot be used as a remote path", path.display())]
    InvalidPath { path: PathBuf },
}

/// Builds one utf-8 `UploadRequest` per regular file under `local_dir`,
/// addressed as `remote_prefix/<relative path>` with forward slashes.
///
/// Files are visited in file-name order. The first file that cannot be read
/// aborts the scan, so a partial tree is never handed to the uploader.
pub fn requests_from_directory(
    local_dir: impl AsRef<Path>,
    remote_prefix: &str,
) -> Result<Vec<UploadRequest>, ScanError> {
    let root = local_dir.as_ref();
    let mut requests = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|cause| ScanError::Walk {
            path: root.to_path_buf(),
            cause,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path
            .strip_prefix(root)
            .map_err(|_| ScanError::InvalidPath {
                path: path.to_path_buf(),
            })?;
        let remote_path = remote_path(remote_prefix, relative)?;

        let content = fs::read_to_string(path).map_err(|cause| ScanError::Read {
            path: path.to_path_buf(),
            cause,
        })?;

        log::debug!("found {} -> {}", path.display(), remote_path);
        requests.push(UploadRequest::text(remote_path, content));
    }

    log::info!("found {} files under {}", requests.len(), root.display());

    Ok(requests)
}

fn remote_path(remote_prefix: &str, relative: &Path) -> Result<String, ScanError> {
    let mut segments = Vec::new();

    let prefix = remote_prefix.replace('\\', "/");
    segments.extend(
        prefix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned),
    );

    for component in relative.components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(segment) => segments.push(segment.to_owned()),
                None => {
                    return Err(ScanError::InvalidPath {
                        path: relative.to_path_buf(),
                    })
                }
            },
            Component::CurDir => {}
            _ => {
                return Err(ScanError::InvalidPath {
                    path: relative.to_path_buf(),
                })
            }
        }
    }

    Ok(segments.join("/"))
}
