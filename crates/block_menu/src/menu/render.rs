use serde::{Deserialize, Serialize};

use crate::document::EditorState;
use crate::menu::definition::MenuDefinition;
use crate::menu::item::MenuLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedItem {
    /// Position of the entry in `MenuDefinition::items`.
    pub index: usize,
    pub label: MenuLabel,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum MenuRow {
    Item(RenderedItem),
    Submenu {
        name: String,
        label: MenuLabel,
        items: Vec<RenderedItem>,
    },
}

/// Renderer output handed to a popup host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuFragment {
    pub rows: Vec<MenuRow>,
}

impl MenuFragment {
    pub fn item_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| match row {
                MenuRow::Item(_) => 1,
                MenuRow::Submenu { items, .. } => items.len(),
            })
            .sum()
    }
}

/// Where a renderer puts what it paints. `id` names a submenu level; `None` is the top level.
pub trait PopupHost {
    fn show(&mut self, id: Option<&str>, fragment: MenuFragment);
    fn close(&mut self);
}

pub trait MenuRenderer {
    fn open(&self, host: &mut dyn PopupHost, definition: &MenuDefinition, state: &EditorState);
}

/// Lays entries out in definition order. Tagged entries collapse into one submenu row, placed
/// where the tag first occurs.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedMenuRenderer;

impl GroupedMenuRenderer {
    pub fn layout(&self, definition: &MenuDefinition, state: &EditorState) -> MenuFragment {
        let mut rows: Vec<MenuRow> = Vec::new();
        for (index, entry) in definition.items().iter().enumerate() {
            let item = RenderedItem {
                index,
                label: entry.item.render(),
                enabled: entry.item.is_enabled(state),
            };
            let Some(name) = entry.submenu.as_deref() else {
                rows.push(MenuRow::Item(item));
                continue;
            };

            let existing = rows.iter_mut().find_map(|row| match row {
                MenuRow::Submenu {
                    name: row_name,
                    items,
                    ..
                } if row_name.as_str() == name => Some(items),
                _ => None,
            });
            match existing {
                Some(items) => items.push(item),
                None => {
                    let label = definition
                        .submenu(name)
                        .map(|descriptor| descriptor.label())
                        .unwrap_or_else(|| MenuLabel::new("", name));
                    rows.push(MenuRow::Submenu {
                        name: name.to_string(),
                        label,
                        items: vec![item],
                    });
                }
            }
        }
        MenuFragment { rows }
    }
}

impl MenuRenderer for GroupedMenuRenderer {
    fn open(&self, host: &mut dyn PopupHost, definition: &MenuDefinition, state: &EditorState) {
        host.show(None, self.layout(definition, state));
    }
}
