//! Page wrapper: the root block, workspace users, and a lazy id index.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::block::{to_no_dash_id, Block};

/// A workspace member referenced by user attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        match (self.given_name.is_empty(), self.family_name.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.family_name),
            (false, true) => self.given_name.clone(),
            (true, false) => self.family_name.clone(),
            (true, true) => String::new(),
        }
    }
}

/// A fully fetched page: the root block tree plus the users referenced
/// from it.
///
/// The id index is built on first lookup and stores child-index paths
/// rather than references, which keeps the struct freely clonable and
/// serializable. Ids are matched in dashless form, so either id flavor
/// resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub root: Block,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(skip)]
    index: OnceCell<HashMap<String, Vec<usize>>>,
}

impl Page {
    pub fn new(root: Block) -> Page {
        Page {
            root,
            users: Vec::new(),
            index: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.root.id
    }

    pub fn title(&self) -> &str {
        &self.root.title
    }

    /// Finds any block in the page subtree by id.
    pub fn block_by_id(&self, id: &str) -> Option<&Block> {
        let index = self.index.get_or_init(|| {
            let mut map = HashMap::new();
            index_block(&self.root, &mut Vec::new(), &mut map);
            map
        });
        let path = index.get(&to_no_dash_id(id))?;
        let mut block = &self.root;
        for &i in path {
            block = block.content.get(i)?;
        }
        Some(block)
    }

    pub fn user_by_id(&self, id: &str) -> Option<&User> {
        let id = to_no_dash_id(id);
        self.users.iter().find(|u| to_no_dash_id(&u.id) == id)
    }
}

fn index_block(block: &Block, path: &mut Vec<usize>, map: &mut HashMap<String, Vec<usize>>) {
    map.insert(to_no_dash_id(&block.id), path.clone());
    for (i, child) in block.content.iter().enumerate() {
        path.push(i);
        index_block(child, path, map);
        path.pop();
    }
}
