use crate::Problem;
use reqwest::cookie::{CookieStore, Jar};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use url::Url;

/// Cookies the server has given us, kept on disk between runs. Stored as a
/// JSON object of server URL to `Cookie` header value, so switching between
/// servers doesn't log you out of the others.
#[derive(Debug)]
pub struct Session {
    /// Where the sessions file lives
    path: PathBuf,

    /// Which server this session is for
    server: Url,

    /// The jar the HTTP client reads and writes
    jar: Arc<Jar>,
}

impl Session {
    /// Load any saved cookies for `server` from `data_dir`. A missing file is
    /// an empty session.
    pub async fn load(data_dir: &Path, server: &Url) -> Result<Self, Problem> {
        let path = data_dir.join("sessions.json");
        let jar = Arc::new(Jar::default());

        if let Some(header) = read(&path).await?.get(server.as_str()) {
            tracing::debug!(?path, "restoring session");

            for cookie in header.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                jar.add_cookie_str(cookie, server);
            }
        }

        Ok(Self {
            path,
            server: server.clone(),
            jar,
        })
    }

    /// The jar to hand to `Client::with_cookie_jar`.
    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Write the jar's current cookies for this server back to disk. If the
    /// server cleared them (e.g. on logout) the entry is removed.
    pub async fn save(&self) -> Result<(), Problem> {
        let mut sessions = read(&self.path).await?;

        match self.jar.cookies(&self.server) {
            Some(header) => {
                sessions.insert(self.server.as_str().to_string(), header.to_str()?.to_string());
            }
            None => {
                sessions.remove(self.server.as_str());
            }
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        tracing::debug!(path = ?self.path, "saving session");
        fs::write(&self.path, serde_json::to_vec(&sessions)?).await?;

        Ok(())
    }
}

/// Read the sessions file, treating a missing file as empty.
async fn read(path: &Path) -> Result<BTreeMap<String, String>, Problem> {
    match fs::read(path).await {
        Ok(data) => Ok(serde_json::from_slice(&data)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(err.into()),
    }
}
