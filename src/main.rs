//! Tabspace — tab organization engine for a browser sidebar.
//!
//! Entry point: runs a console walkthrough of spaces, sections, folders,
//! tab sets and a drag session against an in-memory session store.

use tabspace::database::connection::Database;
use tabspace::managers::drop_delegate::{
    DividerDropDelegate, DropDelegate, FolderDropDelegate, GeneralDropDelegate, SectionHeadDropDelegate,
};
use tabspace::managers::session_manager::{SessionManager, TabPersistence};
use tabspace::managers::tab_manager::{TabManager, TabManagerTrait};
use tabspace::services::render_host::HeadlessRenderHost;
use tabspace::types::drag::{Axis, DropInfo, Point, Size};
use tabspace::types::ids::ContainerId;
use tabspace::types::settings::TabSettings;
use tabspace::types::tab::TabSection;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Tabspace v{} — Demo Mode                    ║", env!("CARGO_PKG_VERSION"));
    println!("║     Spaces, folders and tab sets for a browser sidebar      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let db = Database::open_in_memory().expect("Failed to open database");
    println!("  Session schema version: {}", db.schema_version());
    let store = SessionManager::new(db);

    let mut manager = TabManager::with_parts(TabSettings::default(), Box::new(store));
    let host = HeadlessRenderHost::new();
    manager.set_render_host(Box::new(host.clone()));
    manager.bootstrap();
    let space = manager.active_container().expect("bootstrap creates a space");

    demo_sections(&mut manager, space);
    demo_drag(&mut manager, space);
    demo_folders(&mut manager, space);
    demo_close(&mut manager, space);

    println!("  Live render surfaces: {}", host.live_count());
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Walkthrough finished.");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_space(manager: &TabManager, space: ContainerId) {
    let lists = [
        ("Favorites", manager.favorite_tabs(space)),
        ("Pinned", manager.pinned_tabs(space)),
        ("Normal", manager.normal_tabs(space)),
    ];
    for (label, tabs) in lists {
        let names: Vec<String> = tabs
            .iter()
            .map(|t| {
                let children = manager.children_of(t.id).len();
                if children > 0 {
                    format!("{} (+{})", t.url, children)
                } else {
                    t.url.clone()
                }
            })
            .collect();
        println!("  {:<10} [{}]", label, names.join(", "));
    }
    for folder in manager.folders(space) {
        let names: Vec<&str> = manager.folder_tabs(folder.id).iter().map(|t| t.url.as_str()).collect();
        println!("  📁 {:<7} [{}]", folder.name, names.join(", "));
    }
}

fn demo_sections(manager: &mut TabManager, space: ContainerId) {
    section("Sections");
    for url in ["https://a.example", "https://b.example", "https://c.example", "https://d.example"] {
        manager.create_tab(space, Some(url)).expect("space exists");
    }
    let d = manager.normal_tabs(space)[3].id;
    manager.toggle_pin_tab(d).expect("tab exists");
    let saved = manager.get_tab(d).and_then(|t| t.saved_url.clone());
    println!("  Pinned {} with saved URL {:?}", d, saved);
    print_space(manager, space);
    println!();
}

fn demo_drag(manager: &mut TabManager, space: ContainerId) {
    section("Drag session");
    let normal: Vec<_> = manager.normal_tabs(space).iter().map(|t| t.id).collect();
    let (a, b, c) = (normal[0], normal[1], normal[2]);
    let frame = Size {
        width: 240.0,
        height: 32.0,
    };

    let payload = manager.begin_drag(a);
    let onto_c = GeneralDropDelegate {
        container: space,
        tab: c,
        axis: Axis::Vertical,
    };
    let leading = DropInfo::new(payload.clone()).at(Point { x: 10.0, y: 4.0 }, frame);
    onto_c.drop_entered(manager, &leading);
    onto_c.perform_drop(manager, &leading);
    println!("  Dropped A on the leading half of C (sibling move)");
    print_space(manager, space);

    let payload = manager.begin_drag(b);
    let tileset = DropInfo::new(payload).in_tileset_zone();
    let onto_a = GeneralDropDelegate {
        container: space,
        tab: a,
        axis: Axis::Vertical,
    };
    onto_a.drop_entered(manager, &tileset);
    onto_a.perform_drop(manager, &tileset);
    println!("  Grouped B into A's tab set");

    let payload = manager.begin_drag(b);
    let back = DropInfo::new(payload).in_tileset_zone();
    let onto_b = GeneralDropDelegate {
        container: space,
        tab: b,
        axis: Axis::Vertical,
    };
    let applied = onto_b.drop_entered(manager, &back);
    println!("  Dropping B onto itself applied: {}", applied);
    manager.end_drag();

    let payload = manager.begin_drag(c);
    let head = SectionHeadDropDelegate {
        container: space,
        section: TabSection::Favorite,
    };
    let info = DropInfo::new(payload.clone());
    head.drop_entered(manager, &info);
    head.perform_drop(manager, &info);
    println!("  Dropped C on the favorites header");

    let payload = manager.begin_drag(c);
    let divider = DividerDropDelegate {
        container: space,
        above: TabSection::Pinned,
        below: TabSection::Normal,
        axis: Axis::Vertical,
    };
    let lower = DropInfo::new(payload).at(Point { x: 0.0, y: 6.0 }, Size { width: 240.0, height: 8.0 });
    divider.drop_entered(manager, &lower);
    divider.perform_drop(manager, &lower);
    println!("  Dropped C on the lower half of the pinned/normal divider");
    print_space(manager, space);
    println!();
}

fn demo_folders(manager: &mut TabManager, space: ContainerId) {
    section("Folders");
    let folder = manager.create_folder(space, "Work").expect("space exists");
    let c = manager.normal_tabs(space)[0].id;
    let payload = manager.begin_drag(c);
    let delegate = FolderDropDelegate { container: space, folder };
    let info = DropInfo::new(payload);
    delegate.drop_entered(manager, &info);
    delegate.perform_drop(manager, &info);
    let pinned = manager.get_tab(c).map(|t| t.is_pinned()).unwrap_or(false);
    println!("  Moved C into folder 'Work' (now pinned: {})", pinned);
    print_space(manager, space);
    println!();
}

fn demo_close(manager: &mut TabManager, space: ContainerId) {
    section("Closing and sessions");
    let first = manager.normal_tabs(space)[0].id;
    manager.activate_tab(first).expect("tab exists");
    let children = manager.children_of(first).len();
    manager.close_tab(first).expect("tab exists");
    println!("  Closed the active tab; {} child tab(s) promoted", children);
    println!("  New active tab: {:?}", manager.get_active_tab().map(|t| t.url.as_str()));

    let snapshot = manager.snapshot();
    let mut restored = TabManager::new();
    restored.restore(&snapshot);
    println!(
        "  Snapshot round trip: {} tabs restored, active tab kept: {}",
        restored.tab_count(),
        restored.active_tab_id() == manager.active_tab_id()
    );

    let mut memory = tabspace::managers::session_manager::MemoryPersistence::new();
    memory.save(&snapshot).expect("memory store accepts writes");
    println!("  Snapshots written to the memory store: {}", memory.save_count());
    println!();
}
