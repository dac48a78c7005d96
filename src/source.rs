use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the raw event payload comes from.
pub trait EventSource {
    fn describe(&self) -> String;

    /// Returns the raw payload; a non-success transport status is an error.
    fn fetch(&self) -> Result<String>;
}

pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(HttpSource {
            url: url.to_owned(),
            client,
        })
    }
}

impl EventSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::new(
                ErrorKind::Retrieval,
                &format!("HTTP error! status: {}", status.as_u16()),
            ));
        }

        Ok(response.text()?)
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: &Path) -> Self {
        FileSource {
            path: path.to_owned(),
        }
    }
}

impl EventSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|err| {
            Error::new(
                ErrorKind::Retrieval,
                &format!("{}: {}", self.path.display(), err),
            )
        })
    }
}

/// Picks a source implementation from an identifier: `http(s)://` URLs are
/// fetched over the network, `file://` URLs and plain paths are read from disk.
pub fn open_source(location: &str) -> Result<Box<dyn EventSource>> {
    let location = location.trim();

    if location.is_empty() {
        Err(Error::new(ErrorKind::Config, "no event source configured"))
    } else if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else if let Some(path) = location.strip_prefix("file://") {
        Ok(Box::new(FileSource::new(Path::new(path))))
    } else {
        Ok(Box::new(FileSource::new(Path::new(location))))
    }
}
