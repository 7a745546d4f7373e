use std::path::Path;

use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt},
};

/// Read a file into its non-blank lines, with trailing whitespace trimmed
pub async fn read_lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let file = File::open(path).await?;
    let mut reader = io::BufReader::new(file).lines();

    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().await? {
        let line = line.trim_end();

        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.txt");
        tokio::fs::write(&path, "first line\n\nsecond line  \n\n")
            .await
            .unwrap();

        let lines = read_lines(&path).await.unwrap();

        assert_eq!(lines, vec!["first line", "second line"]);
    }
}
