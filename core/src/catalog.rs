use crate::error::CatalogError;
use crate::tokenizer::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const TITLE_COLUMN: &str = "Movie Name";
pub const OVERVIEW_COLUMN: &str = "Storyline";

pub type DocId = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: Option<String>,
    pub overview: Option<String>,
    /// Normalized overview, empty when the overview is absent or all stop words.
    pub clean_overview: String,
}

impl Document {
    pub fn new(title: Option<String>, overview: Option<String>) -> Self {
        let title = title.filter(|t| !t.is_empty());
        let overview = overview.filter(|o| !o.is_empty());
        let clean_overview = normalize(overview.as_deref());
        Self { title, overview, clean_overview }
    }
}

/// The fixed, ordered movie catalog. A document's position is its identity.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn new(docs: Vec<Document>) -> Self { Self { docs } }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        let corpus = Self::from_csv_reader(file)?;
        tracing::info!(path = %path.display(), num_docs = corpus.len(), "catalog loaded");
        Ok(corpus)
    }

    /// Read a catalog with `Movie Name` and `Storyline` columns. Short rows and invalid UTF-8
    /// are recovered in place; only a missing column or an unreadable source is an error.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.byte_headers()?.clone();
        let position = |column: &'static str| {
            headers
                .iter()
                .position(|h| String::from_utf8_lossy(h).trim() == column)
                .ok_or(CatalogError::MissingColumn { column })
        };
        let title_col = position(TITLE_COLUMN)?;
        let overview_col = position(OVERVIEW_COLUMN)?;

        let mut docs = Vec::new();
        let mut malformed = 0usize;
        for record in rdr.byte_records() {
            let record = record?;
            let field = |col: usize| record.get(col).map(|b| String::from_utf8_lossy(b).into_owned());
            let (title, overview) = (field(title_col), field(overview_col));
            if title.as_deref().map_or(true, str::is_empty) || overview.as_deref().map_or(true, str::is_empty) {
                malformed += 1;
            }
            docs.push(Document::new(title, overview));
        }
        if malformed > 0 {
            tracing::warn!(malformed, "catalog rows with missing title or overview");
        }
        Ok(Self { docs })
    }

    pub fn len(&self) -> usize { self.docs.len() }
    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(id) }
    pub fn iter(&self) -> impl Iterator<Item = &Document> { self.docs.iter() }

    /// Distinct present titles in first-seen order.
    pub fn titles(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.docs
            .iter()
            .filter_map(|d| d.title.as_deref())
            .filter(|t| seen.insert(*t))
            .map(str::to_string)
            .collect()
    }

    /// First document whose title equals `title` exactly.
    pub fn position_of_title(&self, title: &str) -> Option<DocId> {
        self.docs.iter().position(|d| d.title.as_deref() == Some(title))
    }
}
