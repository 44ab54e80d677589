use repo_pin::dom::Document;
use repo_pin::models::RepositoryHit;
use repo_pin::render::{
    clear_candidates, render_candidates, render_saved_card, saved_info_lines, snapshot,
    CANDIDATE_CLASS, REMOVE_CONTROL_CLASS, SAVED_CARD_CLASS, SAVED_INFO_CLASS,
};

#[test]
fn test_search_page_markup() {
    let (doc, handles) = Document::with_search_page();

    assert_eq!(doc.get(handles.input).unwrap().tag, "input");
    assert!(doc.has_class(handles.candidates, "search-block__results"));
    assert!(doc.has_class(handles.saved, "saved"));
    assert!(doc.is_inclusive_descendant(handles.input, doc.body()));
    assert!(!doc.is_inclusive_descendant(handles.saved, handles.candidates));
    assert_eq!(doc.value(handles.input), "");
}

#[test]
fn test_remove_drops_whole_subtree() {
    let mut doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    let leaf = doc.create_element("span");
    doc.append_child(doc.body(), outer);
    doc.append_child(outer, inner);
    doc.append_child(inner, leaf);

    doc.remove(inner);

    assert!(doc.exists(outer));
    assert!(!doc.exists(inner));
    assert!(!doc.exists(leaf));
    assert!(doc.children(outer).is_empty());
    assert_eq!(doc.closest(leaf, "anything"), None);
}

#[test]
fn test_closest_walks_up_from_target() {
    let mut doc = Document::new();
    let card = doc.create_element("div");
    doc.add_class(card, "card");
    let label = doc.create_element("span");
    doc.append_child(doc.body(), card);
    doc.append_child(card, label);

    assert_eq!(doc.closest(label, "card"), Some(card));
    assert_eq!(doc.closest(card, "card"), Some(card));
    assert_eq!(doc.closest(doc.body(), "card"), None);
}

#[test]
fn test_append_child_refuses_cycles() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    doc.append_child(a, b);
    doc.append_child(b, a);

    assert_eq!(doc.parent(b), Some(a));
    assert_eq!(doc.parent(a), None);
}

#[test]
fn test_render_candidates_text_and_data() {
    let (mut doc, handles) = Document::with_search_page();
    let hits = vec![
        RepositoryHit::new("octo", "alice", 42),
        RepositoryHit::new("kit", "bob", 0),
    ];

    render_candidates(&mut doc, handles.candidates, &hits);

    let nodes = doc.children(handles.candidates).to_vec();
    assert_eq!(nodes.len(), 2);
    assert!(doc.has_class(nodes[0], CANDIDATE_CLASS));
    assert_eq!(doc.text_content(nodes[0]), "octo");
    assert_eq!(doc.data(nodes[0], "owner"), Some("alice"));
    assert_eq!(doc.data(nodes[0], "stars"), Some("42"));
    assert_eq!(doc.text_content(nodes[1]), "kit");
    assert_eq!(doc.data(nodes[1], "stars"), Some("0"));
}

#[test]
fn test_render_candidates_replaces_previous_list() {
    let (mut doc, handles) = Document::with_search_page();
    render_candidates(&mut doc, handles.candidates, &[RepositoryHit::new("old", "x", 1)]);
    let old = doc.children(handles.candidates)[0];

    render_candidates(&mut doc, handles.candidates, &[RepositoryHit::new("new", "y", 2)]);

    assert!(!doc.exists(old));
    assert_eq!(snapshot(&doc, &handles).candidate_names(), vec!["new"]);
}

#[test]
fn test_clear_candidates_is_idempotent() {
    let (mut doc, handles) = Document::with_search_page();
    render_candidates(&mut doc, handles.candidates, &[RepositoryHit::new("a", "b", 1)]);
    let live = doc.len();

    clear_candidates(&mut doc, handles.candidates);
    clear_candidates(&mut doc, handles.candidates);

    assert!(doc.children(handles.candidates).is_empty());
    assert_eq!(doc.len(), live - 1);
}

#[test]
fn test_saved_card_structure() {
    let (mut doc, handles) = Document::with_search_page();

    let card = render_saved_card(&mut doc, handles.saved, "octo", "alice", "42");

    assert!(doc.has_class(card, SAVED_CARD_CLASS));
    let parts = doc.children(card).to_vec();
    assert_eq!(parts.len(), 2);
    assert!(doc.has_class(parts[0], SAVED_INFO_CLASS));
    assert!(doc.has_class(parts[1], REMOVE_CONTROL_CLASS));
    assert_eq!(doc.text_content(parts[1]), "Remove");
    assert_eq!(doc.parent(parts[1]), Some(card));

    let view = snapshot(&doc, &handles);
    assert_eq!(view.saved.len(), 1);
    assert_eq!(view.saved[0].lines, saved_info_lines("octo", "alice", "42").to_vec());
    assert_eq!(view.saved[0].remove_control, Some(parts[1]));
}

#[test]
fn test_saved_cards_are_additive() {
    let (mut doc, handles) = Document::with_search_page();

    let first = render_saved_card(&mut doc, handles.saved, "a", "x", "1");
    let second = render_saved_card(&mut doc, handles.saved, "a", "x", "1");

    assert_ne!(first, second);
    assert_eq!(doc.children(handles.saved), &[first, second]);
}

#[test]
fn test_saved_info_lines() {
    assert_eq!(
        saved_info_lines("octo", "alice", "42"),
        [
            "Name: octo".to_string(),
            "Owner: alice".to_string(),
            "Stars: 42".to_string()
        ]
    );
}
