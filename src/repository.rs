/// Number of columns written by [`Repository::to_csv_entry`].
pub const CSV_FIELD_COUNT: usize = 24;

const CSV_DELIMITER: u8 = b',';
const TOPICS_SEPARATOR: &str = "|";

/// One repository returned by the github search api.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub description: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub homepage: Option<String>,
    pub size: u64,
    pub stars: u64,
    pub forks: u64,
    pub issues: u64,
    pub watchers: u64,
    pub language: String,
    pub license: Option<String>,
    pub topics: Vec<String>,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_downloads: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub has_discussions: bool,
    pub is_fork: bool,
    pub is_archived: bool,
    pub is_template: bool,
    pub default_branch: String,
}

impl Repository {
    /// Column values in field declaration order. Topics are joined with `|`
    /// and missing optional values become empty columns.
    pub fn csv_record(&self) -> [String; CSV_FIELD_COUNT] {
        [
            self.name.clone(),
            self.description.clone(),
            self.url.clone(),
            self.created_at.clone(),
            self.updated_at.clone(),
            self.homepage.clone().unwrap_or_default(),
            self.size.to_string(),
            self.stars.to_string(),
            self.forks.to_string(),
            self.issues.to_string(),
            self.watchers.to_string(),
            self.language.clone(),
            self.license.clone().unwrap_or_default(),
            self.topics.join(TOPICS_SEPARATOR),
            self.has_issues.to_string(),
            self.has_projects.to_string(),
            self.has_downloads.to_string(),
            self.has_wiki.to_string(),
            self.has_pages.to_string(),
            self.has_discussions.to_string(),
            self.is_fork.to_string(),
            self.is_archived.to_string(),
            self.is_template.to_string(),
            self.default_branch.clone(),
        ]
    }

    /// Returns the repository as a single csv line (no trailing newline),
    /// quoting columns that contain the delimiter, quotes or line breaks.
    pub fn to_csv_entry(&self) -> Result<String, csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(CSV_DELIMITER)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(self.csv_record())?;
        writer.flush()?;
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        let line = String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(line.strip_suffix('\n').unwrap_or(&line).to_owned())
    }
}
