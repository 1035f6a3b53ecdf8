use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::RefreshPolicy;

/// Outcome of [`fetch_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub path: PathBuf,
    pub bytes: u64,
    /// `false` when the local copy was reused without touching the network.
    pub downloaded: bool,
}

/// Download `url` into `dest`.
///
/// With [`RefreshPolicy::Always`] every call issues one GET and replaces `dest`.
/// The body is staged in a sibling `.part` file and renamed into place, so a failed
/// download leaves `dest` as it was and removes the staging file.
pub fn fetch_dataset(url: &str, dest: &Path, policy: RefreshPolicy) -> io::Result<FetchReport> {
    if policy == RefreshPolicy::IfMissing && dest.is_file() {
        let bytes = fs::metadata(dest)?.len();
        debug!("reusing {} ({bytes} bytes)", dest.display());
        return Ok(FetchReport {
            path: dest.to_path_buf(),
            bytes,
            downloaded: false,
        });
    }

    if let Some(parent) = dest.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    info!("downloading {url}");
    let contents = download(url)?;

    let staging = staging_path(dest);
    let staged = write_file(&staging, &contents).and_then(|()| fs::rename(&staging, dest));
    if let Err(err) = staged {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }

    info!("wrote {} bytes to {}", contents.len(), dest.display());
    Ok(FetchReport {
        path: dest.to_path_buf(),
        bytes: contents.len() as u64,
        downloaded: true,
    })
}

fn download(url: &str) -> io::Result<Vec<u8>> {
    let response = ureq::get(url).call().map_err(|err| match err {
        ureq::Error::Status(code, _) => {
            io::Error::other(format!("{url} responded with status {code}"))
        }
        ureq::Error::Transport(transport) => {
            io::Error::other(format!("failed to fetch {url}: {transport}"))
        }
    })?;

    let mut reader = response.into_reader();
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;
    Ok(contents)
}

fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("download"));
    name.push(".part");
    dest.with_file_name(name)
}
