use crate::dom::{Document, NodeId, PageHandles};
use crate::models::{CandidateView, RepositoryHit, SavedCardView, WidgetSnapshot};

pub const CANDIDATE_CLASS: &str = "search-block__result";
pub const SAVED_CARD_CLASS: &str = "saved__result";
pub const SAVED_INFO_CLASS: &str = "saved__info";
pub const REMOVE_CONTROL_CLASS: &str = "remove-btn";

pub const OWNER_KEY: &str = "owner";
pub const STARS_KEY: &str = "stars";

/// Empties the candidate container
pub fn clear_candidates(doc: &mut Document, container: NodeId) {
    doc.clear_children(container);
}

/// Replaces the candidate list with one node per hit, in hit order.
///
/// The name is the visible text; owner and star count ride along as data
/// attributes and are only shown once the candidate is saved.
pub fn render_candidates(doc: &mut Document, container: NodeId, hits: &[RepositoryHit]) {
    clear_candidates(doc, container);
    for hit in hits {
        let node = doc.create_element("div");
        doc.add_class(node, CANDIDATE_CLASS);
        doc.set_data(node, OWNER_KEY, hit.owner_login.as_str());
        doc.set_data(node, STARS_KEY, hit.star_count.to_string());
        doc.set_text(node, hit.name.as_str());
        doc.append_child(container, node);
    }
}

pub fn saved_info_lines(name: &str, owner: &str, stars: &str) -> [String; 3] {
    [
        format!("Name: {}", name),
        format!("Owner: {}", owner),
        format!("Stars: {}", stars),
    ]
}

/// Appends a saved card (info block plus remove control) and returns it
pub fn render_saved_card(
    doc: &mut Document,
    container: NodeId,
    name: &str,
    owner: &str,
    stars: &str,
) -> NodeId {
    let card = doc.create_element("div");
    doc.add_class(card, SAVED_CARD_CLASS);

    let info = doc.create_element("div");
    doc.add_class(info, SAVED_INFO_CLASS);
    for line in saved_info_lines(name, owner, stars) {
        let p = doc.create_element("p");
        doc.set_text(p, line);
        doc.append_child(info, p);
    }
    doc.append_child(card, info);

    let remove = doc.create_element("button");
    doc.add_class(remove, REMOVE_CONTROL_CLASS);
    doc.set_text(remove, "Remove");
    doc.append_child(card, remove);

    doc.append_child(container, card);
    card
}

pub fn snapshot(doc: &Document, handles: &PageHandles) -> WidgetSnapshot {
    let candidates = doc
        .children(handles.candidates)
        .iter()
        .filter(|node| doc.has_class(**node, CANDIDATE_CLASS))
        .map(|node| CandidateView {
            node: *node,
            name: doc.text_content(*node),
            owner: doc.data(*node, OWNER_KEY).unwrap_or_default().to_string(),
            stars: doc.data(*node, STARS_KEY).unwrap_or_default().to_string(),
        })
        .collect();

    let saved = doc
        .children(handles.saved)
        .iter()
        .map(|card| saved_card_view(doc, *card))
        .collect();

    WidgetSnapshot {
        input: doc.value(handles.input).to_string(),
        candidates,
        saved,
    }
}

fn saved_card_view(doc: &Document, card: NodeId) -> SavedCardView {
    let mut lines = Vec::new();
    let mut remove_control = None;
    for child in doc.children(card) {
        if doc.has_class(*child, SAVED_INFO_CLASS) {
            lines.extend(doc.children(*child).iter().map(|p| doc.text_content(*p)));
        } else if doc.has_class(*child, REMOVE_CONTROL_CLASS) {
            remove_control = Some(*child);
        }
    }
    SavedCardView {
        card,
        remove_control,
        lines,
    }
}
