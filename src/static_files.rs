//! Serves the browser front-end from a directory on disk.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::response::ContentType;
use crate::{Request, Response, Status};

/// The directory mounted under `/static/`.
#[derive(Clone, Debug)]
pub struct StaticDir(pub PathBuf);

/// `GET /static/{*path}`.
///
/// Only plain relative paths resolve; `..`, root or prefix components are
/// treated as missing files.
pub async fn serve(req: Request) -> Response {
    let Some(StaticDir(root)) = req.state::<StaticDir>() else {
        return Response::detail(Status::NotFound, Status::NotFound.reason());
    };
    let Some(relative) = req.param("path").and_then(sanitize) else {
        debug!(path = req.path(), "refusing static path");
        return Response::detail(Status::NotFound, Status::NotFound.reason());
    };

    let file = root.join(&relative);
    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            let content_type = file
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(ContentType::OctetStream, ContentType::from_extension);
            Response::builder().bytes(content_type, bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Response::detail(Status::NotFound, Status::NotFound.reason())
        }
        Err(e) => {
            warn!(file = %file.display(), "failed to read static file: {e}");
            Response::detail(Status::NotFound, Status::NotFound.reason())
        }
    }
}

fn sanitize(raw: &str) -> Option<PathBuf> {
    let path = Path::new(raw);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_relative_paths() {
        assert_eq!(sanitize("app.js"), Some(PathBuf::from("app.js")));
        assert_eq!(sanitize("./css/styles.css"), Some(PathBuf::from("css/styles.css")));
    }

    #[test]
    fn sanitize_refuses_escapes() {
        assert_eq!(sanitize("../secret"), None);
        assert_eq!(sanitize("css/../../secret"), None);
        assert_eq!(sanitize("/etc/passwd"), None);
        assert_eq!(sanitize(""), None);
    }
}
