use super::*;

fn empty_tree() -> FileTree {
    FileTree::new("root")
}

#[test]
fn new_tree_has_open_root() {
    let tree = empty_tree();
    assert_eq!(tree.root_id(), ROOT_ID);
    assert!(tree.is_folder(ROOT_ID));
    assert!(tree.is_open(ROOT_ID));
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.get(ROOT_ID).unwrap().path, "/");
}

#[test]
fn create_child_appends_in_insertion_order_and_opens_parent() {
    let mut tree = empty_tree();
    let src = tree.create_child(ROOT_ID, "src", NodeKind::Folder).unwrap();
    assert!(!tree.is_open(&src));

    let b = tree.create_child(&src, "b.ts", NodeKind::File).unwrap();
    let a = tree.create_child(&src, "a.ts", NodeKind::File).unwrap();

    assert!(tree.is_open(&src));
    let names: Vec<String> = tree
        .children(&src)
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(names, vec!["b.ts", "a.ts"]);

    let a_node = tree.get(&a).unwrap();
    assert_eq!(a_node.parent_id.as_deref(), Some(src.as_str()));
    assert_eq!(a_node.path, "/src/a.ts");
    assert_eq!(a_node.language.as_deref(), Some("typescript"));
    assert_eq!(a_node.content.as_deref(), Some(""));
    assert_ne!(a, b);
}

#[test]
fn create_child_under_file_or_missing_parent_is_noop() {
    let mut tree = empty_tree();
    let file = tree.create_child(ROOT_ID, "a.ts", NodeKind::File).unwrap();
    let before = tree.walk();

    assert!(tree.create_child(&file, "x.ts", NodeKind::File).is_none());
    assert!(tree.create_child("missing", "x.ts", NodeKind::File).is_none());
    assert_eq!(tree.walk(), before);
}

#[test]
fn generated_ids_skip_existing_ids() {
    let mut tree = empty_tree();
    tree.insert_with_id(ROOT_ID, "file-1", "taken.ts", NodeKind::File)
        .unwrap();
    let id = tree.create_child(ROOT_ID, "fresh.ts", NodeKind::File).unwrap();
    assert_ne!(id, "file-1");
    assert!(tree.contains(&id));
}

#[test]
fn insert_with_id_rejects_duplicates_and_file_parents() {
    let mut tree = empty_tree();
    tree.insert_with_id(ROOT_ID, "a", "a.ts", NodeKind::File).unwrap();
    assert_eq!(
        tree.insert_with_id(ROOT_ID, "a", "again.ts", NodeKind::File),
        Err(FileTreeError::DuplicateId)
    );
    assert_eq!(
        tree.insert_with_id("a", "b", "b.ts", NodeKind::File),
        Err(FileTreeError::ParentNotFolder)
    );
    assert_eq!(
        tree.insert_with_id("nope", "c", "c.ts", NodeKind::File),
        Err(FileTreeError::NotFound)
    );
}

#[test]
fn double_toggle_is_identity() {
    let mut tree = FileTree::demo();
    for folder in ["src", "components", ROOT_ID] {
        let before = tree.walk();
        assert!(tree.toggle_folder(folder));
        assert_ne!(tree.walk(), before);
        assert!(tree.toggle_folder(folder));
        assert_eq!(tree.walk(), before);
    }
}

#[test]
fn toggle_file_or_unknown_is_noop() {
    let mut tree = FileTree::demo();
    let before = tree.walk();
    assert!(!tree.toggle_folder("app-tsx"));
    assert!(!tree.toggle_folder("missing"));
    assert_eq!(tree.walk(), before);
}

#[test]
fn delete_removes_entire_subtree() {
    let mut tree = FileTree::demo();
    let expected = tree.subtree_size("src");
    assert_eq!(expected, 5);

    let removed = tree.delete_node("src");

    assert_eq!(removed.len(), expected);
    for id in ["src", "app-tsx", "main-tsx", "components", "button-tsx"] {
        assert!(removed.contains(id), "{id}");
        assert!(!tree.contains(id), "{id}");
    }
    let root_children: Vec<String> = tree
        .children(ROOT_ID)
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(root_children, vec!["package-json", "readme-md"]);
}

#[test]
fn delete_unknown_returns_empty_set() {
    let mut tree = FileTree::demo();
    let before = tree.len();
    assert!(tree.delete_node("missing").is_empty());
    assert_eq!(tree.len(), before);
}

#[test]
fn delete_root_clears_children_but_keeps_root() {
    let mut tree = FileTree::demo();
    let total = tree.len();
    let removed = tree.delete_node(ROOT_ID);
    assert_eq!(removed.len(), total);
    assert!(tree.contains(ROOT_ID));
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn rename_updates_language_and_paths() {
    let mut tree = FileTree::demo();
    assert!(tree.rename_node("app-tsx", "app.py"));
    let node = tree.get("app-tsx").unwrap();
    assert_eq!(node.name, "app.py");
    assert_eq!(node.language.as_deref(), Some("python"));
    assert_eq!(node.path, "/src/app.py");

    assert!(tree.rename_node("app-tsx", "notes.unknown"));
    assert_eq!(
        tree.get("app-tsx").unwrap().language.as_deref(),
        Some("plaintext")
    );

    assert!(tree.rename_node("src", "lib"));
    assert!(tree.get("src").unwrap().language.is_none());
    assert_eq!(
        tree.get("button-tsx").unwrap().path,
        "/lib/components/Button.tsx"
    );
    assert!(!tree.rename_node("missing", "x"));
}

#[test]
fn move_into_own_subtree_is_rejected() {
    let mut tree = FileTree::demo();
    let before = tree.walk();

    assert_eq!(
        tree.move_node("src", "components"),
        Err(FileTreeError::MoveIntoDescendant)
    );
    assert_eq!(
        tree.move_node("src", "src"),
        Err(FileTreeError::MoveIntoDescendant)
    );
    assert_eq!(
        tree.move_node(ROOT_ID, "src"),
        Err(FileTreeError::RootImmovable)
    );
    assert_eq!(
        tree.move_node("src", "readme-md"),
        Err(FileTreeError::ParentNotFolder)
    );
    assert_eq!(tree.walk(), before);
}

#[test]
fn move_reparents_and_refreshes_paths() {
    let mut tree = FileTree::demo();
    tree.move_node("components", ROOT_ID).unwrap();

    let node = tree.get("components").unwrap();
    assert_eq!(node.parent_id.as_deref(), Some(ROOT_ID));
    assert_eq!(node.path, "/components");
    assert_eq!(
        tree.get("button-tsx").unwrap().path,
        "/components/Button.tsx"
    );
    let src_children: Vec<String> = tree
        .children("src")
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(src_children, vec!["app-tsx", "main-tsx"]);
}

#[test]
fn every_non_root_parent_is_an_existing_folder() {
    let mut tree = FileTree::demo();
    let lib = tree.create_child(ROOT_ID, "lib", NodeKind::Folder).unwrap();
    tree.create_child(&lib, "util.rs", NodeKind::File).unwrap();
    tree.move_node("components", &lib).unwrap();
    tree.delete_node("src");

    for node in tree.walk() {
        match node.parent_id {
            None => assert_eq!(node.id, ROOT_ID),
            Some(parent) => assert!(tree.is_folder(&parent), "{}", node.id),
        }
    }
}

#[test]
fn set_content_only_applies_to_files() {
    let mut tree = FileTree::demo();
    assert!(tree.set_content("readme-md", "# hi"));
    assert_eq!(tree.content("readme-md"), Some("# hi"));
    assert!(!tree.set_content("src", "nope"));
    assert!(!tree.set_content("missing", "nope"));
}

#[test]
fn flatten_for_view_hides_closed_folders() {
    let mut tree = FileTree::demo();
    let rows = tree.flatten_for_view();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["src", "App.tsx", "main.tsx", "components", "package.json", "README.md"]
    );
    assert_eq!(rows[0].depth, 0);
    assert_eq!(rows[1].depth, 1);

    tree.toggle_folder("components");
    let rows = tree.flatten_for_view();
    let button = rows.iter().find(|r| r.id == "button-tsx").unwrap();
    assert_eq!(button.depth, 2);
}

#[test]
fn files_lists_only_files_in_preorder() {
    let tree = FileTree::demo();
    let ids: Vec<String> = tree.files().into_iter().map(|n| n.id).collect();
    assert_eq!(
        ids,
        vec!["app-tsx", "main-tsx", "button-tsx", "package-json", "readme-md"]
    );
}

#[test]
fn duplicate_paths_are_tolerated() {
    let mut tree = empty_tree();
    let a = tree.create_child(ROOT_ID, "same.ts", NodeKind::File).unwrap();
    let b = tree.create_child(ROOT_ID, "same.ts", NodeKind::File).unwrap();
    assert_ne!(a, b);
    assert_eq!(tree.get(&a).unwrap().path, tree.get(&b).unwrap().path);
}
