use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::document::EditorState;
use crate::menu::item::{BlockTypeItem, InsertBlockItem, LiftItem, MenuAction, MenuLabel, WrapItem};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuDefinitionError {
    #[error("duplicate submenu: {name}")]
    DuplicateSubmenu { name: String },
    #[error("unknown submenu: {name}")]
    UnknownSubmenu { name: String },
}

/// Presentation data for a named group of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmenuDescriptor {
    pub icon: String,
    pub title: String,
}

impl SubmenuDescriptor {
    pub fn new(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
        }
    }

    pub fn label(&self) -> MenuLabel {
        MenuLabel::new(self.icon.clone(), self.title.clone())
    }
}

#[derive(Clone)]
pub struct MenuEntry {
    pub item: Arc<dyn MenuAction>,
    pub submenu: Option<String>,
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("item", &self.item.render())
            .field("submenu", &self.submenu)
            .finish()
    }
}

/// Ordered menu entries, each optionally tagged with the submenu it belongs to. Insertion order
/// is render order.
#[derive(Default, Clone, Debug)]
pub struct MenuDefinition {
    entries: Vec<MenuEntry>,
    submenus: HashMap<String, SubmenuDescriptor>,
}

impl MenuDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default block menu: dedent, wrapping, a heading submenu, block types and a horizontal rule.
    pub fn block_defaults() -> Self {
        let mut menu = Self::new();
        if let Err(err) = menu.add_block_defaults() {
            tracing::warn!(%err, "default block menu is incomplete");
        }
        menu
    }

    fn add_block_defaults(&mut self) -> Result<(), MenuDefinitionError> {
        self.add_item(LiftItem::new("dedent"));

        self.add_item(
            WrapItem::new("list-ol", "Wrap in ordered list", "ordered_list").through("list_item"),
        );
        self.add_item(
            WrapItem::new("list-ul", "Wrap in bullet list", "bullet_list").through("list_item"),
        );
        self.add_item(WrapItem::new("quote-left", "Wrap in blockquote", "blockquote"));

        self.add_sub("heading", SubmenuDescriptor::new("header", "Heading"))?;
        for level in 1..=6u64 {
            self.add_sub_item(
                "heading",
                BlockTypeItem::new(level.to_string(), format!("Heading {level}"), "heading")
                    .attr("level", json!(level)),
            )?;
        }
        self.add_item(BlockTypeItem::new("paragraph", "Normal paragraph", "paragraph"));
        self.add_item(BlockTypeItem::new("code", "Code block", "code_block"));

        self.add_item(InsertBlockItem::new("minus", "Horizontal rule", "horizontal_rule"));
        Ok(())
    }

    pub fn add_sub(
        &mut self,
        name: impl Into<String>,
        descriptor: SubmenuDescriptor,
    ) -> Result<(), MenuDefinitionError> {
        let name = name.into();
        if self.submenus.contains_key(&name) {
            return Err(MenuDefinitionError::DuplicateSubmenu { name });
        }
        self.submenus.insert(name, descriptor);
        Ok(())
    }

    pub fn add_item(&mut self, item: impl MenuAction + 'static) {
        self.entries.push(MenuEntry {
            item: Arc::new(item),
            submenu: None,
        });
    }

    pub fn add_sub_item(
        &mut self,
        submenu: &str,
        item: impl MenuAction + 'static,
    ) -> Result<(), MenuDefinitionError> {
        if !self.submenus.contains_key(submenu) {
            return Err(MenuDefinitionError::UnknownSubmenu {
                name: submenu.to_string(),
            });
        }
        self.entries.push(MenuEntry {
            item: Arc::new(item),
            submenu: Some(submenu.to_string()),
        });
        Ok(())
    }

    /// Appends another definition's entries and submenus. Submenus already declared here keep
    /// their descriptor.
    pub fn extend(&mut self, other: MenuDefinition) {
        for (name, descriptor) in other.submenus {
            self.submenus.entry(name).or_insert(descriptor);
        }
        self.entries.extend(other.entries);
    }

    pub fn items(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn submenu(&self, name: &str) -> Option<&SubmenuDescriptor> {
        self.submenus.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn execute(&self, index: usize, state: &EditorState) -> Option<EditorState> {
        self.entries.get(index)?.item.execute(state)
    }
}
