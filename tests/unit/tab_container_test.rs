//! Unit tests for the per-space mutation contract (`TabContainerMut`).

use tabspace::managers::tab_graph::TabGraph;
use tabspace::managers::tab_manager::{TabManager, TabManagerTrait};
use tabspace::types::ids::{ContainerId, FolderId, TabId};
use tabspace::types::mutation::{ReorderTarget, Reparenting};
use tabspace::types::tab::TabSection;

/// One space with normal tabs named after `names`, in that order.
fn space_with(names: &[&str]) -> (TabGraph, ContainerId, Vec<TabId>) {
    let mut mgr = TabManager::new();
    let space = mgr.create_container("Home", None);
    let ids = names
        .iter()
        .map(|name| mgr.create_tab(space, Some(*name)).unwrap())
        .collect();
    (TabGraph::from_snapshot(&mgr.snapshot()), space, ids)
}

fn space_with_folders(names: &[&str], folders: &[&str]) -> (TabGraph, ContainerId, Vec<TabId>, Vec<FolderId>) {
    let mut mgr = TabManager::new();
    let space = mgr.create_container("Home", None);
    let ids = names
        .iter()
        .map(|name| mgr.create_tab(space, Some(*name)).unwrap())
        .collect();
    let folder_ids = folders
        .iter()
        .map(|name| mgr.create_folder(space, name).unwrap())
        .collect();
    (TabGraph::from_snapshot(&mgr.snapshot()), space, ids, folder_ids)
}

fn normal(graph: &TabGraph, space: ContainerId) -> Vec<String> {
    section(graph, space, TabSection::Normal)
}

fn section(graph: &TabGraph, space: ContainerId, section: TabSection) -> Vec<String> {
    graph
        .section_tabs(space, section)
        .iter()
        .map(|t| t.url.clone())
        .collect()
}

fn folder(graph: &TabGraph, folder: FolderId) -> Vec<String> {
    graph.folder_tabs(folder).iter().map(|t| t.url.clone()).collect()
}

// === reorder_tabs ===

#[test]
fn test_scenario_a_sibling_drop_from_earlier_lands_after_target() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C"]);
    let (a, c) = (ids[0], ids[2]);

    let applied = graph
        .container_mut(space)
        .unwrap()
        .reorder_tabs(a, ReorderTarget::Tab(c), Reparenting::Sibling);

    assert!(applied);
    assert_eq!(normal(&graph, space), vec!["B", "C", "A"]);
    let moved = graph.tab(a).unwrap();
    assert_eq!(moved.parent, None);
    assert_eq!(moved.section, TabSection::Normal);
}

#[test]
fn test_sibling_drop_from_later_lands_before_target() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C"]);

    graph
        .container_mut(space)
        .unwrap()
        .reorder_tabs(ids[2], ReorderTarget::Tab(ids[0]), Reparenting::Sibling);

    assert_eq!(normal(&graph, space), vec!["C", "A", "B"]);
}

#[test]
fn test_orders_stay_dense_after_moves() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C", "D"]);
    let mut container = graph.container_mut(space).unwrap();
    container.reorder_tabs(ids[3], ReorderTarget::Tab(ids[1]), Reparenting::Sibling);
    container.reorder_tabs(ids[0], ReorderTarget::Tab(ids[2]), Reparenting::Sibling);

    let orders: Vec<i64> = graph
        .section_tabs(space, TabSection::Normal)
        .iter()
        .map(|t| t.order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
}

#[test]
fn test_child_drop_nests_under_target() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C"]);
    let (a, c) = (ids[0], ids[2]);

    assert!(graph
        .container_mut(space)
        .unwrap()
        .reorder_tabs(a, ReorderTarget::Tab(c), Reparenting::Child));

    assert_eq!(graph.tab(a).unwrap().parent, Some(c));
    assert_eq!(normal(&graph, space), vec!["B", "C"]);
    let children: Vec<TabId> = graph.children_of(c).iter().map(|t| t.id).collect();
    assert_eq!(children, vec![a]);
}

#[test]
fn test_reorder_under_own_descendant_is_rejected() {
    let (mut graph, space, ids) = space_with(&["A", "B"]);
    let (a, b) = (ids[0], ids[1]);
    graph
        .container_mut(space)
        .unwrap()
        .reorder_tabs(b, ReorderTarget::Tab(a), Reparenting::Child);
    let before = graph.clone();

    let applied = graph
        .container_mut(space)
        .unwrap()
        .reorder_tabs(a, ReorderTarget::Tab(b), Reparenting::Child);

    assert!(!applied);
    assert_eq!(graph, before);
}

#[test]
fn test_self_drop_is_rejected() {
    let (mut graph, space, ids) = space_with(&["A", "B"]);
    let before = graph.clone();
    let mut container = graph.container_mut(space).unwrap();

    assert!(!container.reorder_tabs(ids[0], ReorderTarget::Tab(ids[0]), Reparenting::Sibling));
    assert!(!container.reorder_tabs(ids[0], ReorderTarget::Tab(ids[0]), Reparenting::Child));
    assert_eq!(graph, before);
}

#[test]
fn test_unknown_ids_are_noops() {
    let (mut graph, space, ids) = space_with(&["A"]);
    let before = graph.clone();
    let stranger = TabId::new();
    let mut container = graph.container_mut(space).unwrap();

    assert!(!container.reorder_tabs(stranger, ReorderTarget::Tab(ids[0]), Reparenting::Sibling));
    assert!(!container.reorder_tabs(ids[0], ReorderTarget::Tab(stranger), Reparenting::Child));
    assert!(!container.combine_to_tileset(stranger, ids[0]));
    assert!(!container.move_tab_to_folder(ids[0], FolderId::new()));
    assert!(!container.reorder_tabs_to_section(stranger, TabSection::Pinned, true));
    assert_eq!(graph, before);
    assert!(graph.container_mut(ContainerId::new()).is_none());
}

#[test]
fn test_section_head_target_retypes() {
    let (mut graph, space, ids) = space_with(&["A", "B"]);

    assert!(graph.container_mut(space).unwrap().reorder_tabs(
        ids[1],
        ReorderTarget::SectionHead(TabSection::Favorite),
        Reparenting::Sibling
    ));

    let moved = graph.tab(ids[1]).unwrap();
    assert!(moved.is_favorite());
    assert_eq!(moved.saved_url.as_deref(), Some("B"));
    assert_eq!(section(&graph, space, TabSection::Favorite), vec!["B"]);
}

// === reorder_tabs_to_section ===

#[test]
fn test_reorder_to_section_head_and_tail() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C"]);
    let mut container = graph.container_mut(space).unwrap();
    container.reorder_tabs_to_section(ids[0], TabSection::Pinned, true);
    container.reorder_tabs_to_section(ids[1], TabSection::Pinned, true);
    container.reorder_tabs_to_section(ids[2], TabSection::Pinned, false);

    assert_eq!(section(&graph, space, TabSection::Pinned), vec!["B", "A", "C"]);
    assert!(normal(&graph, space).is_empty());
}

#[test]
fn test_moving_a_root_carries_its_tab_set() {
    let (mut graph, space, ids) = space_with(&["A", "B"]);
    let (a, b) = (ids[0], ids[1]);
    let mut container = graph.container_mut(space).unwrap();
    container.reorder_tabs(b, ReorderTarget::Tab(a), Reparenting::Child);
    container.reorder_tabs_to_section(a, TabSection::Pinned, true);

    let child = graph.tab(b).unwrap();
    assert_eq!(child.parent, Some(a));
    assert_eq!(child.section, TabSection::Pinned);
    assert_eq!(child.saved_url.as_deref(), Some("B"));
}

// === combine_to_tileset ===

#[test]
fn test_scenario_c_combine_then_reverse_combine_is_rejected() {
    let (mut graph, space, ids) = space_with(&["A", "B"]);
    let (a, b) = (ids[0], ids[1]);

    assert!(graph.container_mut(space).unwrap().combine_to_tileset(a, b));
    assert_eq!(graph.tab(a).unwrap().parent, Some(b));

    assert!(!graph.container_mut(space).unwrap().combine_to_tileset(b, a));
    assert_eq!(graph.tab(a).unwrap().parent, Some(b));
    assert_eq!(graph.tab(b).unwrap().parent, None);
    assert_eq!(graph.ancestors(a), vec![b]);
    assert!(graph.ancestors(b).is_empty());
}

#[test]
fn test_combine_joins_root_of_destination_set() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C"]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);
    let mut container = graph.container_mut(space).unwrap();
    container.combine_to_tileset(b, a);
    container.combine_to_tileset(c, b);

    assert_eq!(graph.tab(c).unwrap().parent, Some(a), "sets stay one level deep");
    let members: Vec<TabId> = graph.children_of(a).iter().map(|t| t.id).collect();
    assert_eq!(members, vec![b, c]);
}

#[test]
fn test_combine_flattens_source_children() {
    let (mut graph, space, ids) = space_with(&["A", "B", "X"]);
    let (a, b, x) = (ids[0], ids[1], ids[2]);
    let mut container = graph.container_mut(space).unwrap();
    container.combine_to_tileset(x, b);
    container.combine_to_tileset(b, a);

    assert_eq!(graph.tab(b).unwrap().parent, Some(a));
    assert_eq!(graph.tab(x).unwrap().parent, Some(a));
    assert!(graph.children_of(b).is_empty());
}

#[test]
fn test_combine_with_self_is_rejected() {
    let (mut graph, space, ids) = space_with(&["A"]);
    assert!(!graph.container_mut(space).unwrap().combine_to_tileset(ids[0], ids[0]));
}

#[test]
fn test_detach_from_tileset_lands_after_root() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C"]);
    let (a, b) = (ids[0], ids[1]);
    let mut container = graph.container_mut(space).unwrap();
    container.combine_to_tileset(b, a);
    assert_eq!(normal(container.graph(), space), vec!["A", "C"]);

    assert!(container.detach_from_tileset(b));
    assert!(!container.detach_from_tileset(b), "already a root");
    assert_eq!(normal(&graph, space), vec!["A", "B", "C"]);
}

// === folders ===

#[test]
fn test_scenario_d_move_between_folders() {
    let (mut graph, space, ids, folders) = space_with_folders(&["E"], &["F", "G"]);
    let (e, f, g) = (ids[0], folders[0], folders[1]);

    assert!(graph.container_mut(space).unwrap().move_tab_to_folder(e, f));
    assert_eq!(folder(&graph, f), vec!["E"]);
    let moved = graph.tab(e).unwrap();
    assert!(moved.is_pinned());
    assert_eq!(moved.saved_url.as_deref(), Some("E"));

    assert!(graph.container_mut(space).unwrap().move_tab_to_folder(e, g));
    assert!(folder(&graph, f).is_empty());
    assert_eq!(folder(&graph, g), vec!["E"]);
}

#[test]
fn test_move_to_folder_inserts_at_head_and_ignores_members() {
    let (mut graph, space, ids, folders) = space_with_folders(&["A", "B"], &["F"]);
    let f = folders[0];
    let mut container = graph.container_mut(space).unwrap();
    container.move_tab_to_folder(ids[0], f);
    container.move_tab_to_folder(ids[1], f);
    assert_eq!(folder(container.graph(), f), vec!["B", "A"]);

    assert!(!container.move_tab_to_folder(ids[0], f));
    assert_eq!(folder(&graph, f), vec!["B", "A"]);
}

#[test]
fn test_move_to_folder_of_another_space_is_rejected() {
    let (mut graph, space, ids, _) = space_with_folders(&["A"], &[]);
    let (_, _, _, foreign) = space_with_folders(&[], &["Elsewhere"]);
    assert!(!graph.container_mut(space).unwrap().move_tab_to_folder(ids[0], foreign[0]));
}

#[test]
fn test_reorder_in_folder_is_a_pure_list_move() {
    let (mut graph, space, ids, folders) = space_with_folders(&["A", "B", "C"], &["F"]);
    let f = folders[0];
    let mut container = graph.container_mut(space).unwrap();
    for id in &ids {
        container.move_tab_to_folder(*id, f);
    }
    assert_eq!(folder(container.graph(), f), vec!["C", "B", "A"]);

    assert!(container.reorder_in_folder(ids[2], ids[0]));
    assert_eq!(folder(&graph, f), vec!["B", "A", "C"]);
    assert!(graph.tab(ids[2]).unwrap().parent.is_none());
}

#[test]
fn test_reorder_in_folder_rejects_non_members() {
    let (mut graph, space, ids, folders) = space_with_folders(&["A", "B"], &["F"]);
    let mut container = graph.container_mut(space).unwrap();
    container.move_tab_to_folder(ids[0], folders[0]);

    assert!(!container.reorder_in_folder(ids[1], ids[0]));
    assert!(!container.reorder_in_folder(ids[0], ids[0]));
}

// === retype ===

#[test]
fn test_retype_to_normal_goes_to_head() {
    let (mut graph, space, ids) = space_with(&["A", "B", "C"]);
    let mut container = graph.container_mut(space).unwrap();
    assert!(container.retype(ids[2], TabSection::Pinned));
    assert!(container.retype(ids[2], TabSection::Normal));
    assert!(!container.retype(ids[2], TabSection::Normal), "already a normal root");

    assert_eq!(normal(&graph, space), vec!["C", "A", "B"]);
    assert_eq!(graph.tab(ids[2]).unwrap().saved_url, None);
}

// === cross-space drops ===

#[test]
fn test_drop_from_another_space_moves_the_tab() {
    let mut mgr = TabManager::new();
    let home = mgr.create_container("Home", None);
    let work = mgr.create_container("Work", None);
    let a = mgr.create_tab(home, Some("A")).unwrap();
    let b = mgr.create_tab(work, Some("B")).unwrap();
    let mut graph = TabGraph::from_snapshot(&mgr.snapshot());

    assert!(graph
        .container_mut(work)
        .unwrap()
        .reorder_tabs(a, ReorderTarget::Tab(b), Reparenting::Sibling));

    assert_eq!(graph.tab(a).unwrap().container, work);
    assert!(normal(&graph, home).is_empty());
    assert_eq!(normal(&graph, work), vec!["A", "B"]);
}
