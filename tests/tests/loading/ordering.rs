use std::time::Duration;

use rstest::*;
use treeloader::{
    loader::{FetchingScriptHost, ResourceLoader, ScriptError},
    manifest::ScriptGroup,
    net::{HttpClient, NetOptions},
};
use treeloader_test_utils::{FakeBundle, MockOrigin, RecordingExecutor, TestHttpServer};

type Loader = ResourceLoader<FetchingScriptHost<HttpClient, RecordingExecutor>>;

fn loader(bundle: &FakeBundle) -> Loader {
    let net = HttpClient::new(&NetOptions::default()).unwrap();
    ResourceLoader::new(FetchingScriptHost::new(net, bundle.executor()))
}

#[rstest]
#[case::reverse(&[120, 60, 0])]
#[case::middle_last(&[0, 120, 30])]
#[case::all_at_once(&[0, 0, 0])]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn group_executes_in_declaration_order(#[case] delays_ms: &[u64]) {
    let origin = ["a.js", "b.js", "c.js"]
        .iter()
        .zip(delays_ms)
        .fold(MockOrigin::new(), |origin, (file, delay)| {
            origin.delayed_file(format!("/js/{file}"), "", Duration::from_millis(*delay))
        });
    let server = TestHttpServer::origin(&origin).await;
    let bundle = FakeBundle::new();

    let group = ScriptGroup::new(server.url("/js/"), ["a.js", "b.js", "c.js"]);
    loader(&bundle).append_group(&group).await.unwrap();

    assert_eq!(bundle.executed_paths(), vec!["/js/a.js", "/js/b.js", "/js/c.js"]);
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn every_fetch_starts_before_the_first_finishes() {
    let origin = MockOrigin::new()
        .delayed_file("/js/a.js", "", Duration::from_millis(200))
        .file("/js/b.js", "");
    let server = TestHttpServer::origin(&origin).await;
    let bundle = FakeBundle::new();
    let loader = loader(&bundle);

    let group = ScriptGroup::new(server.url("/js/"), ["a.js", "b.js"]);
    let pending = loader.append_group(&group);
    tokio::pin!(pending);

    // b.js is served immediately; it must have been requested while a.js is
    // still held back, yet it may not execute first.
    tokio::select! {
        _ = &mut pending => panic!("group finished while a.js was still delayed"),
        () = tokio::time::sleep(Duration::from_millis(100)) => {}
    }
    assert_eq!(origin.hit_count("/js/b.js"), 1);
    assert!(bundle.executed().is_empty());

    pending.await.unwrap();
    assert_eq!(bundle.executed_paths(), vec!["/js/a.js", "/js/b.js"]);
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn failed_script_fails_group_with_its_url() {
    let origin = MockOrigin::new().file("/js/a.js", "").file("/js/c.js", "");
    let server = TestHttpServer::origin(&origin).await;
    let bundle = FakeBundle::new();

    let group = ScriptGroup::new(server.url("/js/"), ["a.js", "missing.js", "c.js"]);
    let error = loader(&bundle).append_group(&group).await.unwrap_err();

    assert!(
        matches!(&error, ScriptError::Failed { url, .. } if url.path() == "/js/missing.js"),
        "{error:?}"
    );
}

#[rstest]
#[timeout(Duration::from_secs(10))]
#[tokio::test]
async fn throwing_script_does_not_stop_later_ones() {
    let origin = MockOrigin::new()
        .file("/js/a.js", "throw")
        .file("/js/b.js", "");
    let server = TestHttpServer::origin(&origin).await;
    let bundle = FakeBundle::new();
    let loader = loader(&bundle);

    let a = loader.append_resource(&server.url("/js/"), "a.js");
    let b = loader.append_resource(&server.url("/js/"), "b.js");

    assert!(a.await.is_err());
    assert_eq!(b.await, Ok(()));
    assert_eq!(bundle.executed_paths(), vec!["/js/b.js"]);
}
