//! Data model for Notion-style block documents
//!
//! ```text
//! A page fetched from the workspace service arrives as a tree of typed
//! blocks plus rich inline text encoded as compact token arrays. This
//! crate defines that tree (Block, BlockKind, Page), the inline text
//! representation (TextSpan, Attr, DateValue), the collection/table
//! schema types, and the token-array parser that turns raw JSON into
//! structured spans.
//!
//! No rendering lives here; folio-html consumes these types. The crate
//! also performs no I/O of its own: collaborators (an API client, a
//! page cache) hand over fully populated records and get a typed tree
//! back.
//!
//! The file structure :
//! .
//! ├── block.rs        # Block nodes and the closed kind set
//! ├── collection.rs   # Collections, views, rows
//! ├── date.rs         # Date attribute payloads and formatting
//! ├── error.rs
//! ├── page.rs         # Page wrapper, users, lazy block index
//! └── text.rs         # TextSpan / Attr and the token parser
//! ```
//!
//! Library Choices
//!
//! ```text
//! serde/serde_json carry the wire shapes; free-form parts (format
//! properties, unparsed table cell values) stay as serde_json::Value
//! until a consumer needs them. indexmap keeps collection schemas in
//! their declared column order. chrono handles date attribute parsing
//! and display formatting. once_cell backs the per-page lazy block
//! index.
//! ```

pub mod block;
pub mod collection;
pub mod date;
pub mod error;
pub mod page;
pub mod text;

pub use block::{to_no_dash_id, Block, BlockKind};
pub use collection::{Collection, CollectionView, CollectionViewSet, ColumnKind, ColumnSchema, Row};
pub use date::DateValue;
pub use error::DecodeError;
pub use page::{Page, User};
pub use text::{parse_text_spans, spans_to_text, Attr, TextSpan};
