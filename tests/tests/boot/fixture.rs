use treeloader::{
    LoadOrchestrator, LoaderConfig,
    loader::FetchingScriptHost,
    manifest::{ManifestOptions, STATIC_AFTER, STATIC_BEFORE},
    net::{HttpClient, NetOptions},
};
use treeloader_test_utils::{
    BundleCollaborators, CountingNet, FakeBundle, MockOrigin, RecordingExecutor,
    RecordingSurface, TestHttpServer,
};

pub(crate) const OWNER: &str = "foo";
pub(crate) const REPO: &str = "The-Modding-Tree";
pub(crate) const BRANCH: &str = "master";
pub(crate) const SHA: &str = "0123abcd";

/// Where the loader page's own static scripts are served.
pub(crate) const HOST_ROOT: &str = "/host/";

pub(crate) type TestNet = CountingNet<HttpClient>;
pub(crate) type TestOrchestrator = LoadOrchestrator<
    TestNet,
    FetchingScriptHost<TestNet, RecordingExecutor>,
    BundleCollaborators,
    RecordingSurface,
>;

pub(crate) fn cdn(file: &str) -> String {
    MockOrigin::cdn_path(OWNER, REPO, SHA, file)
}

pub(crate) fn host(file: &str) -> String {
    format!("{HOST_ROOT}js/{file}")
}

/// A complete static-mode mod: the page's own scripts, `js/mod.js` listing
/// `extensions` and the extensions themselves. `game.js` defines the hooks.
pub(crate) fn static_mod(extensions: &[&str]) -> MockOrigin {
    let origin = STATIC_BEFORE
        .iter()
        .chain(STATIC_AFTER)
        .fold(MockOrigin::new(), |origin, file| {
            let body = if *file == "game.js" {
                "defines: load, updateMouse"
            } else {
                ""
            };
            origin.file(host(file), body)
        })
        .branch(OWNER, REPO, BRANCH, SHA)
        .file(
            cdn("js/mod.js"),
            format!("mod_files: {}", extensions.join(", ")),
        );
    extensions
        .iter()
        .fold(origin, |origin, file| origin.file(cdn(&format!("js/{file}")), ""))
}

/// Everything an end-to-end attempt touches.
pub(crate) struct Harness {
    pub(crate) origin: MockOrigin,
    pub(crate) server: TestHttpServer,
    pub(crate) bundle: FakeBundle,
    pub(crate) surface: RecordingSurface,
    pub(crate) net: TestNet,
}

impl Harness {
    pub(crate) async fn start(origin: MockOrigin) -> Self {
        let server = TestHttpServer::origin(&origin).await;
        let net = CountingNet::new(HttpClient::new(&NetOptions::default()).unwrap());
        Self {
            origin,
            server,
            bundle: FakeBundle::new(),
            surface: RecordingSurface::new(),
            net,
        }
    }

    pub(crate) fn config(&self) -> LoaderConfig {
        LoaderConfig::default()
            .with_api_base(self.server.api_base())
            .with_cdn_base(self.server.cdn_base())
            .with_manifest(ManifestOptions::default().with_local_root(self.server.url(HOST_ROOT)))
    }

    pub(crate) fn orchestrator(&self) -> TestOrchestrator {
        LoadOrchestrator::new(
            &self.config(),
            self.net.clone(),
            FetchingScriptHost::new(self.net.clone(), self.bundle.executor()),
            self.bundle.collaborators(),
            self.surface.clone(),
        )
        .unwrap()
    }

    /// Requests that reached the CDN.
    pub(crate) fn cdn_hits(&self) -> Vec<String> {
        self.origin
            .hits()
            .into_iter()
            .filter(|hit| hit.starts_with(MockOrigin::CDN_ROOT))
            .collect()
    }
}
