use std::time::Duration;

use axum::http::StatusCode;
use rstest::*;
use treeloader::{
    Field, LoadError, Region,
    core::{LoadState, ModParams, Phase, ReferenceBuilder},
    events::LoadEvent,
    manifest::{STATIC_AFTER, STATIC_BEFORE},
};
use treeloader_test_utils::{MockOrigin, SurfaceOp};
use url::Url;

use super::fixture::{BRANCH, Harness, OWNER, REPO, SHA, cdn, host, static_mod};

fn query(query: &str) -> ModParams {
    ModParams::from_query(query)
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn owner_only_loads_static_mod() {
    let harness = Harness::start(static_mod(&["layers/a.js", "layers/b.js"])).await;
    let orchestrator = harness.orchestrator();

    let state = orchestrator.boot(query("user=foo")).await;
    assert_eq!(state, LoadState::Ready);

    let mut expected: Vec<String> = STATIC_BEFORE.iter().map(|file| host(file)).collect();
    expected.push(cdn("js/mod.js"));
    expected.push(cdn("js/layers/a.js"));
    expected.push(cdn("js/layers/b.js"));
    expected.extend(STATIC_AFTER.iter().map(|file| host(file)));
    assert_eq!(harness.bundle.executed_paths(), expected);

    assert_eq!(
        harness.origin.hits()[0],
        MockOrigin::branch_path(OWNER, REPO, BRANCH)
    );
    assert_eq!(
        harness.bundle.calls(),
        vec!["extension_files", "check", "start", "input"]
    );
    assert!(!harness.surface.is_visible(Region::Loading));
    assert!(harness.surface.is_visible(Region::App));
}

#[rstest]
#[case::none(&[])]
#[case::one(&["layers.js"])]
#[case::several(&["a.js", "b.js", "c.js", "d.js"])]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn entry_point_runs_right_before_extensions(#[case] extensions: &[&str]) {
    let harness = Harness::start(static_mod(extensions)).await;
    harness.orchestrator().boot(query("user=foo")).await;

    let executed = harness.bundle.executed_paths();
    let entry = executed
        .iter()
        .position(|path| *path == cdn("js/mod.js"))
        .unwrap();
    for (offset, file) in extensions.iter().enumerate() {
        assert_eq!(executed[entry + 1 + offset], cdn(&format!("js/{file}")));
    }
    assert_eq!(
        executed[entry + 1 + extensions.len()],
        host(STATIC_AFTER[0])
    );
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn branch_failure_is_shown_and_selector_refilled() {
    let origin = MockOrigin::new().branch_failure(
        OWNER,
        REPO,
        BRANCH,
        StatusCode::NOT_FOUND,
        "branch not found",
    );
    let harness = Harness::start(origin).await;

    let state = harness.orchestrator().boot(query("user=foo")).await;
    assert_eq!(state, LoadState::Failed("branch not found".into()));

    let surface = &harness.surface;
    assert!(
        surface
            .text(Region::Error)
            .is_some_and(|text| text.contains("branch not found"))
    );
    assert!(surface.is_visible(Region::Error));
    assert!(surface.is_visible(Region::Selector));
    assert!(!surface.is_visible(Region::Loading));
    assert_eq!(surface.field(Field::Owner), "foo");
    assert_eq!(surface.field(Field::Repository), "The-Modding-Tree");
    assert_eq!(surface.field(Field::Branch), "master");
    assert!(!surface.flag(Field::Mode));
    assert!(harness.cdn_hits().is_empty());
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn message_with_success_status_still_fails() {
    let origin = MockOrigin::new().branch_failure(
        OWNER,
        REPO,
        BRANCH,
        StatusCode::OK,
        "API rate limit exceeded",
    );
    let harness = Harness::start(origin).await;

    let result = harness.orchestrator().run(&query("user=foo")).await;
    assert!(
        matches!(&result, Err(LoadError::ReferenceResolution { message }) if message == "API rate limit exceeded"),
        "{result:?}"
    );
}

#[rstest]
#[case::absent("")]
#[case::empty("user=&repo=bar")]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn missing_owner_never_touches_the_network(#[case] params: &str) {
    let harness = Harness::start(static_mod(&[])).await;

    let state = harness.orchestrator().boot(query(params)).await;

    assert_eq!(state, LoadState::Failed("GitHub user not specified".into()));
    assert_eq!(harness.net.request_count(), 0);
    assert!(harness.origin.hits().is_empty());
    assert!(harness.surface.is_visible(Region::Selector));
    assert_eq!(harness.surface.field(Field::Owner), "");
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn failing_entry_point_stops_later_groups() {
    let origin = static_mod(&["layers/a.js"]).status(cdn("js/mod.js"), StatusCode::NOT_FOUND);
    let harness = Harness::start(origin).await;
    let orchestrator = harness.orchestrator();

    let result = orchestrator.run(&query("user=foo")).await;

    assert!(
        matches!(&result, Err(LoadError::ResourceLoad { url }) if url.ends_with("/js/mod.js")),
        "{result:?}"
    );
    assert!(matches!(orchestrator.state(), LoadState::Failed(_)));
    assert_eq!(harness.origin.hit_count(&cdn("js/layers/a.js")), 0);
    for file in STATIC_AFTER {
        assert_eq!(harness.origin.hit_count(&host(file)), 0, "{file} was requested");
    }
    assert!(harness.bundle.calls().is_empty());
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn undefined_hook_is_a_startup_failure() {
    let origin = static_mod(&[]).file(host("game.js"), "");
    let harness = Harness::start(origin).await;

    let state = harness.orchestrator().boot(query("user=foo")).await;

    assert_eq!(
        state,
        LoadState::Failed("could not start the mod: load is not defined".into())
    );
    assert!(harness.surface.is_visible(Region::Error));
    assert!(!harness.surface.is_visible(Region::App));
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn missing_input_hook_never_starts_the_mod() {
    let origin = static_mod(&[]).file(host("game.js"), "defines: load");
    let harness = Harness::start(origin).await;

    let state = harness.orchestrator().boot(query("user=foo")).await;

    assert_eq!(
        state,
        LoadState::Failed("could not start the mod: updateMouse is not defined".into())
    );
    assert_eq!(harness.bundle.calls(), vec!["extension_files", "check"]);
    assert!(harness.surface.is_visible(Region::Error));
    assert!(harness.surface.is_visible(Region::Selector));
    assert!(!harness.surface.is_visible(Region::App));
    assert!(!harness.surface.is_visible(Region::Loading));
    assert!(
        !harness
            .surface
            .ops()
            .iter()
            .any(|op| matches!(op, SurfaceOp::Show(Region::App) | SurfaceOp::ReplaceContent(..)))
    );
}

fn discovered_mod(index: &str) -> MockOrigin {
    MockOrigin::new()
        .branch(OWNER, REPO, BRANCH, SHA)
        .file(cdn("index.html"), index)
        .delayed_file(
            cdn("js/a.js"),
            "mod_files: x.js, y.js",
            Duration::from_millis(80),
        )
        .file(cdn("js/b.js"), "defines: load, updateMouse")
        .file(cdn("js/x.js"), "")
        .file(cdn("js/y.js"), "")
}

const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <script src="js/a.js"></script>
    <script src="js/technical/loader.js"></script>
    <script src="js/b.js"></script>
</head>
<body>
    <div id="loadingSection">Loading...</div>
    <div id="app"><p>hello {{ player.points }}</p></div>
</body>
</html>"#;

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn discovered_mode_follows_the_document() {
    let harness = Harness::start(discovered_mod(INDEX)).await;

    let state = harness
        .orchestrator()
        .boot(query("user=foo&mode=full"))
        .await;
    assert_eq!(state, LoadState::Ready);

    assert_eq!(
        harness.bundle.executed_paths(),
        vec![
            cdn("js/a.js"),
            cdn("js/x.js"),
            cdn("js/y.js"),
            cdn("js/b.js")
        ]
    );
    assert_eq!(harness.origin.hit_count(&cdn("js/technical/loader.js")), 0);
    assert_eq!(
        harness.surface.content(Region::App).as_deref(),
        Some("<p>hello {{ player.points }}</p>")
    );

    let ops = harness.surface.ops();
    let replaced = ops
        .iter()
        .position(|op| matches!(op, SurfaceOp::ReplaceContent(Region::App, _)))
        .unwrap();
    let shown = ops
        .iter()
        .position(|op| *op == SurfaceOp::Show(Region::App))
        .unwrap();
    assert!(replaced < shown);
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn discovered_without_extension_list_loads_document_scripts() {
    let origin = MockOrigin::new()
        .branch(OWNER, REPO, BRANCH, SHA)
        .file(cdn("index.html"), INDEX)
        .file(cdn("js/a.js"), "")
        .file(cdn("js/b.js"), "defines: load, updateMouse");
    let harness = Harness::start(origin).await;

    let state = harness
        .orchestrator()
        .boot(query("user=foo&mode=full"))
        .await;

    assert_eq!(state, LoadState::Ready);
    assert_eq!(
        harness.bundle.executed_paths(),
        vec![cdn("js/a.js"), cdn("js/b.js")]
    );
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn duplicate_extension_is_loaded_once() {
    let origin = discovered_mod(INDEX).file(cdn("js/a.js"), "mod_files: x.js, ../js/b.js, x.js");
    let harness = Harness::start(origin).await;

    let state = harness
        .orchestrator()
        .boot(query("user=foo&mode=full"))
        .await;

    assert_eq!(state, LoadState::Ready);
    assert_eq!(harness.origin.hit_count(&cdn("js/b.js")), 1);
    assert_eq!(harness.origin.hit_count(&cdn("js/x.js")), 1);
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn document_without_scripts_fails_to_parse() {
    let origin = MockOrigin::new()
        .branch(OWNER, REPO, BRANCH, SHA)
        .file(cdn("index.html"), "<html><body>nothing</body></html>");
    let harness = Harness::start(origin).await;

    let result = harness
        .orchestrator()
        .run(&query("user=foo&mode=full"))
        .await;
    assert!(matches!(result, Err(LoadError::ManifestParse(_))), "{result:?}");
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn pinned_loads_are_identical() {
    let harness = Harness::start(static_mod(&["layers/a.js"])).await;

    harness.orchestrator().boot(query("user=foo")).await;
    let first = harness.cdn_hits();
    harness.orchestrator().boot(query("user=foo")).await;
    let all = harness.cdn_hits();

    assert_eq!(all.len(), first.len() * 2);
    assert_eq!(&all[first.len()..], first.as_slice());
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn state_only_moves_forward() {
    let harness = Harness::start(static_mod(&[])).await;
    let orchestrator = harness.orchestrator();
    let mut events = orchestrator.events().subscribe();

    orchestrator.boot(query("user=foo")).await;

    let mut states = vec![LoadState::Idle];
    let mut completed = Vec::new();
    while let Ok(event) = events.try_recv() {
        match event {
            LoadEvent::StateChanged { from, to } => {
                assert_eq!(states.last(), Some(&from));
                assert!(from.can_transition_to(&to));
                states.push(to);
            }
            LoadEvent::GroupCompleted { phase } => completed.push(phase),
            _ => {}
        }
    }
    assert_eq!(
        states,
        vec![
            LoadState::Idle,
            LoadState::ResolvingVersion,
            LoadState::ResolvingManifest,
            LoadState::LoadingResources,
            LoadState::Ready
        ]
    );
    assert_eq!(
        completed,
        vec![
            Phase::Before,
            Phase::EntryPoint,
            Phase::Extensions,
            Phase::After
        ]
    );
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn selector_submission_round_trips() {
    let harness = Harness::start(MockOrigin::new()).await;
    let surface = &harness.surface;
    surface.type_into(Field::Owner, "bar");
    surface.type_into(Field::Repository, "Other-Tree");
    surface.type_into(Field::Branch, "feature/x");
    surface.check(Field::Mode, true);

    let page = Url::parse("https://host.example/loader/?user=old#top").unwrap();
    let target = ReferenceBuilder::new(page).for_params(&treeloader::read_params(surface));

    assert_eq!(target.fragment(), None);
    let params = query(target.query().unwrap());
    assert_eq!(params.owner, "bar");
    assert_eq!(params.repository, "Other-Tree");
    assert_eq!(params.branch, "feature/x");
    assert!(params.mode.is_discovered());
}
