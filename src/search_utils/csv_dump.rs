use std::path::{Path, PathBuf};

use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::github_api_utils::github_api_helper::RepositorySearch;
use crate::repository::Repository;

/// `<output_dir>/repositories_{lang}_{limit}_{offset}.csv`
pub fn dump_file_path(output_dir: &Path, search: &RepositorySearch) -> PathBuf {
    output_dir.join(format!(
        "repositories_{}_{}_{}.csv",
        search.language, search.limit, search.offset
    ))
}

/// Appends one csv line per repository to `path`, creating the parent
/// directory and the file when missing.
pub async fn append_repositories_to_file(
    path: &Path,
    repos: &[Repository],
) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    let mut content = String::new();
    for repo in repos {
        content.push_str(&repo.to_csv_entry().map_err(std::io::Error::from)?);
        content.push('\n');
    }
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    info!("Wrote {} repositories to {}", repos.len(), path.display());
    Ok(())
}
