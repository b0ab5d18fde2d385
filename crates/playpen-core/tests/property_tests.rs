//! # Property-Based Tests
//!
//! Workspace invariants under arbitrary operation sequences.

use playpen_core::{
    ArtifactStore, Compositor, Confirmation, MemoryRecords, MutationEngine, PersistenceGateway,
    Workspace, resolve_kind,
};
use proptest::collection::vec;
use proptest::prelude::*;

/// One user-triggered operation.
#[derive(Debug, Clone)]
enum Op {
    Create(String, Option<String>),
    CreateFolder(String),
    Rename(String, String),
    Delete(String, bool),
    Select(String),
    Edit(String),
}

fn artifact_name() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["index", "main", "app", "styles", "util", "a.b"]),
        prop::sample::select(vec!["html", "css", "js", "ts", "py", "php", "txt", "HTML", ""]),
    )
        .prop_map(|(stem, ext)| {
            if ext.is_empty() {
                stem.to_string()
            } else {
                format!("{stem}.{ext}")
            }
        })
}

fn folder_name() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["src", "lib", "assets", ""]).prop_map(String::from))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (artifact_name(), folder_name()).prop_map(|(n, f)| Op::Create(n, f)),
        prop::sample::select(vec!["lib", "assets", "src"]).prop_map(|f| Op::CreateFolder(f.into())),
        (artifact_name(), artifact_name()).prop_map(|(a, b)| Op::Rename(a, b)),
        (artifact_name(), any::<bool>()).prop_map(|(n, c)| Op::Delete(n, c)),
        artifact_name().prop_map(Op::Select),
        "[a-z<>/ ]{0,24}".prop_map(Op::Edit),
    ]
}

fn apply(ws: &mut Workspace, op: &Op) -> bool {
    let result = match op {
        Op::Create(name, folder) => MutationEngine::create(ws, name, folder.as_deref()),
        Op::CreateFolder(name) => MutationEngine::create_folder(ws, name),
        Op::Rename(old, new) => MutationEngine::rename(ws, old, new),
        Op::Delete(name, confirmed) => {
            MutationEngine::delete(ws, name, Confirmation::from(*confirmed))
        }
        Op::Select(name) => MutationEngine::select(ws, name),
        Op::Edit(content) => MutationEngine::edit(ws, content),
    };
    result.is_ok()
}

proptest! {
    /// Store and index never disagree, whatever the user does.
    #[test]
    fn store_and_index_stay_consistent(ops in vec(op(), 0..60)) {
        let mut ws = Workspace::seeded();
        for op in &ops {
            apply(&mut ws, op);

            let report = ws.integrity_report();
            prop_assert!(report.dangling_members.is_empty(), "after {:?}: {:?}", op, report);
            prop_assert!(report.unfiled_artifacts.is_empty(), "after {:?}: {:?}", op, report);
        }
    }

    /// The selection always names a live artifact, or nothing.
    #[test]
    fn selection_is_never_dangling(ops in vec(op(), 0..60)) {
        let mut ws = Workspace::seeded();
        for op in &ops {
            apply(&mut ws, op);
            if let Some(name) = ws.active_name() {
                prop_assert!(ws.artifacts().contains(name));
            }
        }
    }

    /// Every stored kind is the resolver's answer for its name.
    #[test]
    fn kind_always_matches_name(ops in vec(op(), 0..60)) {
        let mut ws = Workspace::seeded();
        for op in &ops {
            apply(&mut ws, op);
        }
        for artifact in ws.artifacts().iter() {
            prop_assert_eq!(resolve_kind(&artifact.name).ok(), Some(artifact.kind));
        }
    }

    /// A rejected operation changes nothing.
    #[test]
    fn rejection_is_atomic(ops in vec(op(), 0..40), last in op()) {
        let mut ws = Workspace::seeded();
        for op in &ops {
            apply(&mut ws, op);
        }
        let before = ws.clone();
        if !apply(&mut ws, &last) {
            prop_assert_eq!(ws, before);
        }
    }

    /// What is saved is what loads, modulo placeholders.
    #[test]
    fn saved_workspace_reloads(ops in vec(op(), 0..40)) {
        let mut ws = Workspace::seeded();
        for op in &ops {
            apply(&mut ws, op);
        }

        let mut records = MemoryRecords::new();
        PersistenceGateway::save(&mut records, &ws).expect("save");
        let loaded = PersistenceGateway::load(&records);

        prop_assert_eq!(loaded.artifacts(), ws.artifacts());
        let populated: Vec<_> = ws.folders().iter().filter(|(_, m)| !m.is_empty()).collect();
        prop_assert_eq!(loaded.folders().iter().collect::<Vec<_>>(), populated);
    }

    /// With both markers present, every stylesheet and script appears once.
    #[test]
    fn compose_inlines_every_fragment(
        css in vec("[a-z{}:;]{0,12}", 0..5),
        js in vec("[a-z();]{0,12}", 0..5),
    ) {
        let mut ws = Workspace::new();
        MutationEngine::create(&mut ws, "index.html", None).expect("create");
        MutationEngine::edit(&mut ws, "<head></head><body></body>").expect("edit");
        for (i, body) in css.iter().enumerate() {
            let name = format!("s{i}.css");
            MutationEngine::create(&mut ws, &name, None).expect("create");
            MutationEngine::select(&mut ws, &name).expect("select");
            MutationEngine::edit(&mut ws, body).expect("edit");
        }
        for (i, body) in js.iter().enumerate() {
            let name = format!("j{i}.js");
            MutationEngine::create(&mut ws, &name, None).expect("create");
            MutationEngine::select(&mut ws, &name).expect("select");
            MutationEngine::edit(&mut ws, body).expect("edit");
        }

        let doc = Compositor::compose(ws.artifacts(), "index.html").expect("compose");

        let expected_len = "<head></head><body></body>".len()
            + css.iter().map(|c| c.len() + "<style></style>".len()).sum::<usize>()
            + js.iter().map(|j| j.len() + "<script></script>".len()).sum::<usize>();
        prop_assert_eq!(doc.len(), expected_len);
        prop_assert_eq!(doc.matches("<style>").count(), css.len());
        prop_assert_eq!(doc.matches("<script>").count(), js.len());
    }

    /// Marker text inside fragments never relocates a block.
    #[test]
    fn fragments_with_markers_stay_in_place(
        css in vec("(x|</head>|</body>){0,3}", 0..4),
        js in vec("(y|</head>|</body>){0,3}", 0..4),
    ) {
        let mut store = ArtifactStore::new();
        store.put("index.html", "<head></head><body></body>").expect("put");
        for (i, body) in css.iter().enumerate() {
            store.put(&format!("s{i}.css"), body.as_str()).expect("put");
        }
        for (i, body) in js.iter().enumerate() {
            store.put(&format!("j{i}.js"), body.as_str()).expect("put");
        }

        let styles: String = css.iter().map(|c| format!("<style>{c}</style>")).collect();
        let scripts: String = js.iter().map(|j| format!("<script>{j}</script>")).collect();
        let expected = format!("<head>{styles}</head><body>{scripts}</body>");

        prop_assert_eq!(Compositor::compose(&store, "index.html"), Some(expected));
    }
}
