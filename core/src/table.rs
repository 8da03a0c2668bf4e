use std::{fs, io::Read, path::Path};

use csv_core::{ReadFieldResult, Reader};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::{ColorError, LoadError},
    rgb::Rgb,
};

pub const COLUMN_R: &str = "R";
pub const COLUMN_G: &str = "G";
pub const COLUMN_B: &str = "B";
pub const COLUMN_NAME: &str = "Color Name";

// Grown on demand when a field does not fit
const INITIAL_FIELD_CAPACITY: usize = 64;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// A named reference color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    pub name: String,
    #[serde(flatten)]
    pub rgb: Rgb,
}

impl ColorEntry {
    pub fn new(name: impl Into<String>, r: u8, g: u8, b: u8) -> Self {
        ColorEntry {
            name: name.into(),
            rgb: Rgb::new(r, g, b),
        }
    }

    pub fn r(&self) -> u8 {
        self.rgb.r
    }

    pub fn g(&self) -> u8 {
        self.rgb.g
    }

    pub fn b(&self) -> u8 {
        self.rgb.b
    }
}

/// Reference colors in the order they were loaded. Read-only once built,
/// so a table can be shared between threads freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    source: String,
    entries: Vec<ColorEntry>,
}

impl ColorTable {
    /// Build a table from entries already in memory, keeping their order.
    pub fn from_entries(source: impl Into<String>, entries: Vec<ColorEntry>) -> Self {
        ColorTable {
            source: source.into(),
            entries,
        }
    }

    /// Read a CSV file with at least the `R`, `G`, `B` and `Color Name` columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ColorError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let data = fs::read(path).map_err(|e| ColorError::unavailable(&source, e.into()))?;
        Self::parse(source, &data)
    }

    pub fn from_reader(
        source: impl Into<String>,
        mut reader: impl Read,
    ) -> Result<Self, ColorError> {
        let source = source.into();
        let mut data = Vec::new();
        if let Err(e) = reader.read_to_end(&mut data) {
            return Err(ColorError::unavailable(source, e.into()));
        }
        Self::parse(source, &data)
    }

    pub fn from_csv(source: impl Into<String>, csv: &str) -> Result<Self, ColorError> {
        Self::parse(source.into(), csv.as_bytes())
    }

    fn parse(source: String, data: &[u8]) -> Result<Self, ColorError> {
        match parse_entries(data) {
            Ok(entries) => {
                if entries.is_empty() {
                    warn!(source = %source, "color table has no entries");
                } else {
                    info!(source = %source, entries = entries.len(), "loaded color table");
                }
                Ok(ColorTable { source, entries })
            }
            Err(cause) => Err(ColorError::unavailable(source, cause)),
        }
    }

    /// Where the table was loaded from, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ColorTable {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Positions of the required columns within a record.
struct Columns {
    r: usize,
    g: usize,
    b: usize,
    name: usize,
}

impl Columns {
    fn locate(header: &[String]) -> Result<Self, LoadError> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(LoadError::MissingColumn(column))
        };
        Ok(Columns {
            r: find(COLUMN_R)?,
            g: find(COLUMN_G)?,
            b: find(COLUMN_B)?,
            name: find(COLUMN_NAME)?,
        })
    }

    fn entry(&self, record: usize, fields: &[String]) -> Result<ColorEntry, LoadError> {
        let name = field(record, fields, self.name, COLUMN_NAME)?.trim();
        if name.is_empty() {
            return Err(LoadError::EmptyName { record });
        }
        Ok(ColorEntry::new(
            name,
            component(record, fields, self.r, COLUMN_R)?,
            component(record, fields, self.g, COLUMN_G)?,
            component(record, fields, self.b, COLUMN_B)?,
        ))
    }
}

fn field<'a>(
    record: usize,
    fields: &'a [String],
    index: usize,
    column: &'static str,
) -> Result<&'a str, LoadError> {
    fields.get(index).map(String::as_str).ok_or(LoadError::ShortRecord {
        record,
        column,
        found: fields.len(),
        needed: index + 1,
    })
}

fn component(
    record: usize,
    fields: &[String],
    index: usize,
    column: &'static str,
) -> Result<u8, LoadError> {
    let value = field(record, fields, index, column)?;
    value.trim().parse::<u8>().map_err(|_| LoadError::InvalidComponent {
        record,
        column,
        value: value.to_string(),
    })
}

fn parse_entries(data: &[u8]) -> Result<Vec<ColorEntry>, LoadError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut records = split_records(data)?.into_iter();
    let header = records.next().ok_or(LoadError::MissingHeader)?;
    let columns = Columns::locate(&header)?;

    // record numbers are 1-based and count the header
    records
        .enumerate()
        .map(|(i, fields)| columns.entry(i + 2, &fields))
        .collect()
}

/// Split CSV data into records of fields. Quoting follows RFC 4180;
/// blank lines are skipped.
fn split_records(data: &[u8]) -> Result<Vec<Vec<String>>, LoadError> {
    let mut reader = Reader::new();
    let mut input = data;
    let mut field = vec![0u8; INITIAL_FIELD_CAPACITY];
    let mut field_len = 0;
    let mut record = Vec::new();
    let mut records = Vec::new();

    loop {
        let (result, nin, nout) = reader.read_field(input, &mut field[field_len..]);
        input = &input[nin..];
        field_len += nout;
        match result {
            // an empty slice on the next call tells the reader the data ended
            ReadFieldResult::InputEmpty => {}
            ReadFieldResult::OutputFull => {
                let capacity = field.len() * 2;
                field.resize(capacity, 0);
            }
            ReadFieldResult::Field { record_end } => {
                let value = std::str::from_utf8(&field[..field_len]).map_err(|_| LoadError::Utf8 {
                    record: records.len() + 1,
                })?;
                record.push(value.to_string());
                field_len = 0;
                if record_end {
                    records.push(std::mem::take(&mut record));
                }
            }
            ReadFieldResult::End => break,
        }
    }

    Ok(records)
}
