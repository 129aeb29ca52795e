//! List paths from a newline-separated text file.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::PathLister;

/// Reads one path per line, skipping blank lines. Useful for saved
/// `git ls-tree` output or for paths gathered from another tool.
#[derive(Debug, Clone)]
pub struct FileLister {
    path: PathBuf,
}

impl FileLister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PathLister for FileLister {
    async fn list_paths(&self) -> Result<Vec<String>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read path list: {}", self.path.display()))?;
        Ok(parse_lines(&text))
    }
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_lines_keeps_order_and_spaces() {
        let paths = parse_lines("b?.txt\r\n\n a .md\nc\n");
        assert_eq!(paths, vec!["b?.txt", " a .md", "c"]);
    }

    #[tokio::test]
    async fn reads_list_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"index.html\nblog/index.html?p=2\n").unwrap();
        f.flush().unwrap();
        let paths = FileLister::new(f.path()).list_paths().await.unwrap();
        assert_eq!(paths, vec!["index.html", "blog/index.html?p=2"]);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = FileLister::new("/definitely/not/here.txt")
            .list_paths()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("read path list"));
    }
}
