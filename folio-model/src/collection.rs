//! Collections, views, rows: the tabular side of the block model.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Declared type of a collection column. Declarations the service adds
/// later fall through to [`ColumnKind::Unrecognized`]; renderers only
/// special-case a couple of kinds anyway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Title,
    Text,
    Number,
    Select,
    MultiSelect,
    Date,
    Person,
    File,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Unrecognized(String),
}

impl ColumnKind {
    pub fn from_wire(tag: &str) -> ColumnKind {
        match tag {
            "title" => ColumnKind::Title,
            "text" => ColumnKind::Text,
            "number" => ColumnKind::Number,
            "select" => ColumnKind::Select,
            "multi_select" => ColumnKind::MultiSelect,
            "date" => ColumnKind::Date,
            "person" => ColumnKind::Person,
            "file" => ColumnKind::File,
            "checkbox" => ColumnKind::Checkbox,
            "url" => ColumnKind::Url,
            "email" => ColumnKind::Email,
            "phone_number" => ColumnKind::PhoneNumber,
            other => ColumnKind::Unrecognized(other.to_string()),
        }
    }

    pub fn wire_name(&self) -> &str {
        match self {
            ColumnKind::Title => "title",
            ColumnKind::Text => "text",
            ColumnKind::Number => "number",
            ColumnKind::Select => "select",
            ColumnKind::MultiSelect => "multi_select",
            ColumnKind::Date => "date",
            ColumnKind::Person => "person",
            ColumnKind::File => "file",
            ColumnKind::Checkbox => "checkbox",
            ColumnKind::Url => "url",
            ColumnKind::Email => "email",
            ColumnKind::PhoneNumber => "phone_number",
            ColumnKind::Unrecognized(tag) => tag,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Serialize for ColumnKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for ColumnKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ColumnKind::from_wire(&tag))
    }
}

/// Schema entry for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
}

/// A named table with a declared column schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// Column schemas keyed by column id, in declared order.
    #[serde(default)]
    pub schema: IndexMap<String, ColumnSchema>,
}

/// One visible arrangement of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionView {
    pub id: String,
    /// Column keys in display order, already filtered to the visible ones.
    #[serde(default)]
    pub visible_columns: Vec<String>,
}

/// One collection row. Cell values stay raw token arrays until rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    /// Raw inline-content values keyed by column id.
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

/// Everything a collection-view block carries: the view, the collection it
/// views, and the rows visible through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionViewSet {
    pub view: CollectionView,
    pub collection: Collection,
    #[serde(default)]
    pub rows: Vec<Row>,
}
