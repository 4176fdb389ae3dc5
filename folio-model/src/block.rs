//! Block nodes and the closed kind set.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::collection::CollectionViewSet;
use crate::text::TextSpan;

/// The kind tag of a [`Block`], mirroring the wire tags of the workspace
/// service. Tags the service adds later deserialize into
/// [`BlockKind::Unrecognized`] so a fetched page always decodes; deciding
/// what to do with such blocks is the renderer's call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Page,
    Text,
    Bookmark,
    BulletedList,
    NumberedList,
    Toggle,
    Todo,
    Divider,
    Image,
    Header,
    SubHeader,
    SubSubHeader,
    Quote,
    Code,
    ColumnList,
    Column,
    CollectionView,
    CollectionViewPage,
    Comment,
    Embed,
    Gist,
    Maps,
    Codepen,
    Tweet,
    Video,
    Audio,
    File,
    Drive,
    Figma,
    Pdf,
    Equation,
    Callout,
    TableOfContents,
    Breadcrumb,
    Factory,
    Unrecognized(String),
}

impl BlockKind {
    pub fn from_wire(tag: &str) -> BlockKind {
        match tag {
            "page" => BlockKind::Page,
            "text" => BlockKind::Text,
            "bookmark" => BlockKind::Bookmark,
            "bulleted_list" => BlockKind::BulletedList,
            "numbered_list" => BlockKind::NumberedList,
            "toggle" => BlockKind::Toggle,
            "to_do" => BlockKind::Todo,
            "divider" => BlockKind::Divider,
            "image" => BlockKind::Image,
            "header" => BlockKind::Header,
            "sub_header" => BlockKind::SubHeader,
            "sub_sub_header" => BlockKind::SubSubHeader,
            "quote" => BlockKind::Quote,
            "code" => BlockKind::Code,
            "column_list" => BlockKind::ColumnList,
            "column" => BlockKind::Column,
            "collection_view" => BlockKind::CollectionView,
            "collection_view_page" => BlockKind::CollectionViewPage,
            "comment" => BlockKind::Comment,
            "embed" => BlockKind::Embed,
            "gist" => BlockKind::Gist,
            "maps" => BlockKind::Maps,
            "codepen" => BlockKind::Codepen,
            "tweet" => BlockKind::Tweet,
            "video" => BlockKind::Video,
            "audio" => BlockKind::Audio,
            "file" => BlockKind::File,
            "drive" => BlockKind::Drive,
            "figma" => BlockKind::Figma,
            "pdf" => BlockKind::Pdf,
            "equation" => BlockKind::Equation,
            "callout" => BlockKind::Callout,
            "table_of_contents" => BlockKind::TableOfContents,
            "breadcrumb" => BlockKind::Breadcrumb,
            "factory" => BlockKind::Factory,
            other => BlockKind::Unrecognized(other.to_string()),
        }
    }

    pub fn wire_name(&self) -> &str {
        match self {
            BlockKind::Page => "page",
            BlockKind::Text => "text",
            BlockKind::Bookmark => "bookmark",
            BlockKind::BulletedList => "bulleted_list",
            BlockKind::NumberedList => "numbered_list",
            BlockKind::Toggle => "toggle",
            BlockKind::Todo => "to_do",
            BlockKind::Divider => "divider",
            BlockKind::Image => "image",
            BlockKind::Header => "header",
            BlockKind::SubHeader => "sub_header",
            BlockKind::SubSubHeader => "sub_sub_header",
            BlockKind::Quote => "quote",
            BlockKind::Code => "code",
            BlockKind::ColumnList => "column_list",
            BlockKind::Column => "column",
            BlockKind::CollectionView => "collection_view",
            BlockKind::CollectionViewPage => "collection_view_page",
            BlockKind::Comment => "comment",
            BlockKind::Embed => "embed",
            BlockKind::Gist => "gist",
            BlockKind::Maps => "maps",
            BlockKind::Codepen => "codepen",
            BlockKind::Tweet => "tweet",
            BlockKind::Video => "video",
            BlockKind::Audio => "audio",
            BlockKind::File => "file",
            BlockKind::Drive => "drive",
            BlockKind::Figma => "figma",
            BlockKind::Pdf => "pdf",
            BlockKind::Equation => "equation",
            BlockKind::Callout => "callout",
            BlockKind::TableOfContents => "table_of_contents",
            BlockKind::Breadcrumb => "breadcrumb",
            BlockKind::Factory => "factory",
            BlockKind::Unrecognized(tag) => tag,
        }
    }

    /// Heading rank for `header`/`sub_header`/`sub_sub_header`, 1 to 3.
    pub fn heading_rank(&self) -> Option<u8> {
        match self {
            BlockKind::Header => Some(1),
            BlockKind::SubHeader => Some(2),
            BlockKind::SubSubHeader => Some(3),
            _ => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_rank().is_some()
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Serialize for BlockKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for BlockKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(BlockKind::from_wire(&tag))
    }
}

/// One node of the document tree.
///
/// Children are kept in document order and never reordered. The tree is a
/// strict hierarchy; nothing here points back at a parent, so ancestor
/// context travels with the traversal instead of living on the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Plain title text: the flattened body for paragraphs and headings,
    /// the source text for code and equation blocks, the page title for
    /// page blocks.
    #[serde(default)]
    pub title: String,
    /// Parsed rich body text.
    #[serde(default)]
    pub inline_content: Vec<TextSpan>,
    /// Parsed caption for media kinds, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<TextSpan>>,
    /// Child blocks in document order.
    #[serde(default)]
    pub content: Vec<Block>,
    /// Free-form formatting properties (page cover, block color, column
    /// ratio, ...). Values stay raw JSON; see the `format_*` accessors.
    #[serde(default)]
    pub format: Map<String, Value>,
    /// Ids of files attached to media blocks.
    #[serde(default)]
    pub file_ids: Vec<String>,
    /// Source URI for media kinds.
    #[serde(default)]
    pub source: String,
    /// Target URI for bookmark blocks.
    #[serde(default)]
    pub link: String,
    /// Checkbox state for to-do blocks.
    #[serde(default)]
    pub is_checked: bool,
    /// View/collection/row triples for collection-view kinds.
    #[serde(default)]
    pub collection_views: Vec<CollectionViewSet>,
}

impl Block {
    /// Creates an empty block of the given kind. Collaborators that build
    /// trees by hand fill the public fields directly.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Block {
        Block {
            id: id.into(),
            kind,
            title: String::new(),
            inline_content: Vec::new(),
            caption: None,
            content: Vec::new(),
            format: Map::new(),
            file_ids: Vec::new(),
            source: String::new(),
            link: String::new(),
            is_checked: false,
            collection_views: Vec::new(),
        }
    }

    /// Looks up a formatting property by dotted path, descending through
    /// nested objects ("drive_properties.url").
    pub fn format_value(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.format.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn format_str(&self, path: &str) -> Option<&str> {
        self.format_value(path).and_then(Value::as_str)
    }

    pub fn format_f64(&self, path: &str) -> Option<f64> {
        self.format_value(path).and_then(Value::as_f64)
    }

    pub fn has_children(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Normalizes a block/page id to its dashless form, the shape used in
/// service permalinks. Ids arrive in both dashed and dashless flavors
/// depending on which API surface produced them.
pub fn to_no_dash_id(id: &str) -> String {
    id.chars().filter(|c| *c != '-').collect()
}
