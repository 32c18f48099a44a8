//! Report records and JSON serialization

use crate::movie::MovieIdentifier;
use serde::Serialize;
use std::io::Write;

/// Image count for one title
///
/// Field order and names are part of the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageCountRecord {
    /// Catalog identifier of the title
    pub imdb_id: MovieIdentifier,

    /// Canonical title page URL
    pub url: String,

    /// Number of images listed on the media index page
    pub count: u64,
}

/// All records of a run, in the order their detail pages completed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    records: Vec<ImageCountRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ImageCountRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ImageCountRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the report as a JSON array
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Writes the report as a JSON array followed by a newline
    pub fn write_to<W: Write>(&self, mut writer: W, pretty: bool) -> crate::Result<()> {
        let json = self.to_json(pretty)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        Ok(())
    }
}

impl FromIterator<ImageCountRecord> for Report {
    fn from_iter<I: IntoIterator<Item = ImageCountRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
