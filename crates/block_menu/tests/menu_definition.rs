use std::sync::Arc;

use plate_block_menu::menu::{
    BlockTypeItem, CommandItem, MenuDefinition, MenuDefinitionError, SubmenuDescriptor,
};
use plate_block_menu::{Document, EditorState, Node, Point, Selection};

fn titles(menu: &MenuDefinition) -> Vec<String> {
    menu.items()
        .iter()
        .map(|entry| entry.item.render().title)
        .collect()
}

#[test]
fn entries_keep_insertion_order_and_submenu_tags() {
    let mut menu = MenuDefinition::new();
    menu.add_sub("heading", SubmenuDescriptor::new("header", "Heading"))
        .unwrap();
    for level in 1..=6u64 {
        menu.add_sub_item(
            "heading",
            BlockTypeItem::new(level.to_string(), format!("Heading {level}"), "heading")
                .attr("level", serde_json::json!(level)),
        )
        .unwrap();
    }
    menu.add_item(BlockTypeItem::new("paragraph", "Normal paragraph", "paragraph"));
    menu.add_item(BlockTypeItem::new("code", "Code block", "code_block"));

    let items = menu.items();
    assert_eq!(items.len(), 8);
    assert_eq!(
        titles(&menu),
        vec![
            "Heading 1",
            "Heading 2",
            "Heading 3",
            "Heading 4",
            "Heading 5",
            "Heading 6",
            "Normal paragraph",
            "Code block",
        ]
    );
    assert!(
        items[..6]
            .iter()
            .all(|entry| entry.submenu.as_deref() == Some("heading"))
    );
    assert!(items[6..].iter().all(|entry| entry.submenu.is_none()));
    assert_eq!(
        menu.submenu("heading"),
        Some(&SubmenuDescriptor::new("header", "Heading"))
    );
}

#[test]
fn duplicate_submenu_is_rejected_and_first_descriptor_kept() {
    let mut menu = MenuDefinition::new();
    menu.add_sub("heading", SubmenuDescriptor::new("header", "Heading"))
        .unwrap();

    let err = menu
        .add_sub("heading", SubmenuDescriptor::new("h", "Titles"))
        .unwrap_err();
    assert_eq!(
        err,
        MenuDefinitionError::DuplicateSubmenu {
            name: "heading".to_string()
        }
    );
    assert_eq!(err.to_string(), "duplicate submenu: heading");
    assert_eq!(menu.submenu("heading").unwrap().title, "Heading");
}

#[test]
fn item_for_undeclared_submenu_is_rejected() {
    let mut menu = MenuDefinition::new();
    let err = menu
        .add_sub_item("insert", BlockTypeItem::new("code", "Code block", "code_block"))
        .unwrap_err();

    assert_eq!(
        err,
        MenuDefinitionError::UnknownSubmenu {
            name: "insert".to_string()
        }
    );
    assert!(menu.is_empty());
}

#[test]
fn block_defaults_assemble_the_standard_menu() {
    let menu = MenuDefinition::block_defaults();

    assert_eq!(
        titles(&menu),
        vec![
            "Lift out of enclosing block",
            "Wrap in ordered list",
            "Wrap in bullet list",
            "Wrap in blockquote",
            "Heading 1",
            "Heading 2",
            "Heading 3",
            "Heading 4",
            "Heading 5",
            "Heading 6",
            "Normal paragraph",
            "Code block",
            "Horizontal rule",
        ]
    );
    let tagged: Vec<usize> = menu
        .items()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.submenu.is_some())
        .map(|(ix, _)| ix)
        .collect();
    assert_eq!(tagged, vec![4, 5, 6, 7, 8, 9]);
    assert_eq!(menu.submenu("heading").unwrap().icon, "header");
    assert_eq!(menu.items()[0].item.render().icon, "dedent");
}

#[test]
fn extend_appends_entries_and_keeps_existing_submenus() {
    let mut base = MenuDefinition::new();
    base.add_sub("heading", SubmenuDescriptor::new("header", "Heading"))
        .unwrap();
    base.add_sub_item("heading", BlockTypeItem::new("1", "Heading 1", "heading"))
        .unwrap();

    let mut extra = MenuDefinition::new();
    extra
        .add_sub("heading", SubmenuDescriptor::new("h", "Other"))
        .unwrap();
    extra
        .add_sub("insert", SubmenuDescriptor::new("plus", "Insert"))
        .unwrap();
    extra
        .add_sub_item("insert", BlockTypeItem::new("code", "Code block", "code_block"))
        .unwrap();

    base.extend(extra);

    assert_eq!(titles(&base), vec!["Heading 1", "Code block"]);
    assert_eq!(base.submenu("heading").unwrap().title, "Heading");
    assert_eq!(base.submenu("insert").unwrap().title, "Insert");
}

#[test]
fn execute_dispatches_to_the_entry_at_index() {
    let mut menu = MenuDefinition::new();
    menu.add_item(CommandItem::new("x", "Clear document", |state: &EditorState| {
        let mut next = state.clone();
        next.doc.children = vec![Node::paragraph("")];
        Some(next)
    }));

    let state = EditorState::new(
        Document::new(vec![Node::paragraph("a"), Node::paragraph("b")]),
        Selection::collapsed(Point::new(vec![1], 0)),
    );

    let next = menu.execute(0, &state).unwrap();
    assert_eq!(next.doc.children, vec![Node::paragraph("")]);
    assert!(menu.execute(1, &state).is_none());
}

#[test]
fn definitions_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    let menu = Arc::new(MenuDefinition::block_defaults());
    assert_send_sync(&menu);
    assert_eq!(menu.len(), 13);
}
