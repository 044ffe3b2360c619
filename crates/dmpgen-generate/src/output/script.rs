//! Document-store seeding script: select the database, clear the
//! collection, bulk-insert the catalog.
//!
//! ```text
//! db=connect("<database>");
//! use("<database>");
//! db.<collection>.deleteMany({});
//! db.<collection>.insertMany(
//! [ ...pretty JSON... ]
//! );
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use dmpgen_core::DatasetRecord;

use crate::errors::GenerationError;

pub const DEFAULT_DATABASE: &str = "tp2_mongodb";
pub const DEFAULT_COLLECTION: &str = "jeux_de_donnees";
const INSERT_OPEN: &str = ".insertMany(\n";
const INSERT_CLOSE: &str = "\n);";

/// Database and collection the script seeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTarget {
    pub database: String,
    pub collection: String,
}

impl Default for ScriptTarget {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl ScriptTarget {
    /// The database lands in a string literal and the collection in a
    /// property access, so both are restricted.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.database.is_empty()
            || self
                .database
                .chars()
                .any(|c| c == '"' || c == '\\' || c.is_control())
        {
            return Err(GenerationError::InvalidOptions(format!(
                "invalid database name '{}'",
                self.database
            )));
        }

        let mut chars = self.collection.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GenerationError::InvalidOptions(format!(
                "invalid collection name '{}'",
                self.collection
            )));
        }
        Ok(())
    }
}

/// A parsed seeding script.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedScript {
    pub target: ScriptTarget,
    pub records: Vec<DatasetRecord>,
}

/// Write the seeding script to `writer`, returning the bytes written.
pub fn write_seed_script<W: Write>(
    writer: W,
    target: &ScriptTarget,
    records: &[DatasetRecord],
) -> Result<u64, GenerationError> {
    target.validate()?;
    let mut writer = CountingWriter::new(writer);
    let ScriptTarget {
        database,
        collection,
    } = target;

    writeln!(writer, "db=connect(\"{database}\");")?;
    writeln!(writer, "use(\"{database}\");")?;
    writeln!(writer, "db.{collection}.deleteMany({{}});")?;
    write!(writer, "db.{collection}{INSERT_OPEN}")?;

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"  "));
    records.serialize(&mut serializer)?;

    writeln!(writer, "{INSERT_CLOSE}")?;
    writer.flush()?;
    Ok(writer.bytes_written())
}

pub fn render_seed_script(
    target: &ScriptTarget,
    records: &[DatasetRecord],
) -> Result<String, GenerationError> {
    let mut buffer = Vec::new();
    write_seed_script(&mut buffer, target, records)?;
    String::from_utf8(buffer).map_err(|err| GenerationError::InvalidScript(err.to_string()))
}

/// Read back a script written by [`write_seed_script`].
pub fn parse_seed_script(script: &str) -> Result<SeedScript, GenerationError> {
    let mut lines = script.lines();
    let database = lines
        .next()
        .and_then(|line| line.strip_prefix("db=connect(\""))
        .and_then(|rest| rest.strip_suffix("\");"))
        .ok_or_else(|| GenerationError::InvalidScript("missing connect statement".to_string()))?;

    let use_line = format!("use(\"{database}\");");
    if lines.next() != Some(use_line.as_str()) {
        return Err(GenerationError::InvalidScript(format!(
            "expected `{use_line}` on line 2"
        )));
    }

    let collection = lines
        .next()
        .and_then(|line| line.strip_prefix("db."))
        .and_then(|rest| rest.strip_suffix(".deleteMany({});"))
        .ok_or_else(|| GenerationError::InvalidScript("missing deleteMany statement".to_string()))?;

    let insert_open = format!("db.{collection}{INSERT_OPEN}");
    let payload_start = script
        .find(&insert_open)
        .map(|index| index + insert_open.len())
        .ok_or_else(|| {
            GenerationError::InvalidScript(format!("missing insertMany into {collection}"))
        })?;
    let payload_end = script
        .rfind(INSERT_CLOSE)
        .filter(|index| *index >= payload_start)
        .ok_or_else(|| GenerationError::InvalidScript("unterminated insertMany".to_string()))?;

    let records = serde_json::from_str(&script[payload_start..payload_end])?;
    Ok(SeedScript {
        target: ScriptTarget {
            database: database.to_string(),
            collection: collection.to_string(),
        },
        records,
    })
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
