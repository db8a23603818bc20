//! RuneLite bank-tag export parser.
//!
//! The bank tags plugin exports one record per line:
//!
//! ```text
//! banktags,1,{name},{itemId},{itemId},...
//! banktaglayouts,1,{name},{itemId},{position},{itemId},{position},...
//! ```
//!
//! Parsing never fails as a whole. Every non-blank line ends up in exactly
//! one of [`BankTagImport::tags`], [`BankTagImport::layouts`] or
//! [`BankTagImport::errors`].

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

const TAGS_KIND: &str = "banktags";
const LAYOUTS_KIND: &str = "banktaglayouts";
const SUPPORTED_VERSION: &str = "1";

// ============================================================================
// Records
// ============================================================================

/// A named bag of item IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTag {
    /// Tag name.
    pub name: String,
    /// Tagged items, in export order.
    pub item_ids: Vec<i64>,
}

/// One item placed at a bank slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPosition {
    /// Item ID.
    pub item_id: i64,
    /// Bank slot.
    pub position: i64,
}

/// A named bank layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTagLayout {
    /// Layout name.
    pub name: String,
    /// Item placements, in export order.
    pub positions: Vec<LayoutPosition>,
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankTagRejection {
    /// Fewer than `kind,version,name`.
    #[error("expected kind,version,name")]
    MissingFields,

    /// Version other than `1`.
    #[error("unsupported version '{0}'")]
    UnsupportedVersion(String),

    /// Neither `banktags` nor `banktaglayouts`.
    #[error("unknown record kind '{0}'")]
    UnknownKind(String),

    /// A token that is not an integer.
    #[error("'{0}' is not an integer")]
    InvalidNumber(String),

    /// A layout whose item/position list has odd length.
    #[error("layout has {0} values; expected itemId,position pairs")]
    UnpairedLayout(usize),

    /// Blank record name.
    #[error("name must not be empty")]
    EmptyName,

    /// Negative item ID.
    #[error("item id {0} is negative")]
    NegativeItemId(i64),

    /// Negative bank slot.
    #[error("position {0} is negative")]
    NegativePosition(i64),
}

impl Serialize for BankTagRejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A rejected line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTagError {
    /// 1-based line number in the input.
    pub line_number: usize,
    /// The offending line, trimmed.
    pub line: String,
    /// What was wrong with it.
    pub reason: BankTagRejection,
}

/// Result of parsing an export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BankTagImport {
    /// Parsed `banktags` records.
    pub tags: Vec<BankTag>,
    /// Parsed `banktaglayouts` records.
    pub layouts: Vec<BankTagLayout>,
    /// Lines that could not be parsed.
    pub errors: Vec<BankTagError>,
}

impl BankTagImport {
    /// Returns true if no line was rejected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of lines accounted for.
    pub fn line_count(&self) -> usize {
        self.tags.len() + self.layouts.len() + self.errors.len()
    }
}

// ============================================================================
// Parser
// ============================================================================

enum Record {
    Tag(BankTag),
    Layout(BankTagLayout),
}

/// Parses a RuneLite bank-tag export.
pub fn parse_bank_tag_export(text: &str) -> BankTagImport {
    let mut import = BankTagImport::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(Record::Tag(tag)) => import.tags.push(tag),
            Ok(Record::Layout(layout)) => import.layouts.push(layout),
            Err(reason) => {
                debug!(line = index + 1, %reason, "Rejected bank tag line");
                import.errors.push(BankTagError {
                    line_number: index + 1,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    import
}

fn parse_line(line: &str) -> Result<Record, BankTagRejection> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [kind, version, name, rest @ ..] = fields.as_slice() else {
        return Err(BankTagRejection::MissingFields);
    };

    if *version != SUPPORTED_VERSION {
        return Err(BankTagRejection::UnsupportedVersion((*version).to_string()));
    }

    let record = match *kind {
        TAGS_KIND => Record::Tag(BankTag {
            name: (*name).to_string(),
            item_ids: parse_integers(rest)?,
        }),
        LAYOUTS_KIND => {
            let values = parse_integers(rest)?;
            if values.len() % 2 != 0 {
                return Err(BankTagRejection::UnpairedLayout(values.len()));
            }
            let positions = values
                .chunks_exact(2)
                .map(|pair| LayoutPosition {
                    item_id: pair[0],
                    position: pair[1],
                })
                .collect();
            Record::Layout(BankTagLayout {
                name: (*name).to_string(),
                positions,
            })
        }
        other => return Err(BankTagRejection::UnknownKind(other.to_string())),
    };

    validate(&record)?;
    Ok(record)
}

fn parse_integers(tokens: &[&str]) -> Result<Vec<i64>, BankTagRejection> {
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| BankTagRejection::InvalidNumber((*token).to_string()))
        })
        .collect()
}

fn validate(record: &Record) -> Result<(), BankTagRejection> {
    match record {
        Record::Tag(tag) => {
            check_name(&tag.name)?;
            if let Some(&id) = tag.item_ids.iter().find(|id| **id < 0) {
                return Err(BankTagRejection::NegativeItemId(id));
            }
        }
        Record::Layout(layout) => {
            check_name(&layout.name)?;
            for slot in &layout.positions {
                if slot.item_id < 0 {
                    return Err(BankTagRejection::NegativeItemId(slot.item_id));
                }
                if slot.position < 0 {
                    return Err(BankTagRejection::NegativePosition(slot.position));
                }
            }
        }
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), BankTagRejection> {
    if name.is_empty() {
        Err(BankTagRejection::EmptyName)
    } else {
        Ok(())
    }
}
