use tracing::{debug, info};
use treeloader_core::{LoadState, ModParams, Phase};
use treeloader_events::{EventBus, LoadEvent};
use treeloader_loader::{ResourceLoader, ScriptHost};
use treeloader_manifest::{ManifestResolver, ScriptGroup};
use treeloader_net::Net;
use url::Url;

use crate::{
    collaborators::Collaborators,
    config::LoaderConfig,
    error::{LoadError, LoadResult},
    recovery::RecoveryPresenter,
    state::StateTracker,
    surface::{Region, RenderSurface},
    version::VersionResolver,
};

/// Runs one load attempt from parameters to a started mod.
///
/// Every step waits for the previous one: version lookup, manifest, then each
/// script group in turn. The extension list is read from the
/// [`Collaborators`] only after the groups before it have executed, because
/// those scripts are what defines it.
pub struct LoadOrchestrator<N, H, C, S> {
    versions: VersionResolver<N>,
    manifests: ManifestResolver<N>,
    loader: ResourceLoader<H>,
    collaborators: C,
    surface: S,
    events: EventBus,
    state: StateTracker,
}

impl<N, H, C, S> LoadOrchestrator<N, H, C, S>
where
    N: Net + Clone,
    H: ScriptHost,
    C: Collaborators,
    S: RenderSurface,
{
    /// # Errors
    ///
    /// [`LoadError::Config`] when the API or CDN base is not a usable URL.
    pub fn new(
        config: &LoaderConfig,
        net: N,
        host: H,
        collaborators: C,
        surface: S,
    ) -> LoadResult<Self> {
        let versions = VersionResolver::new(
            net.clone(),
            parse_base(&config.api_base)?,
            parse_base(&config.cdn_base)?,
        )?;
        let events = EventBus::new(config.event_capacity);

        Ok(Self {
            versions,
            manifests: ManifestResolver::new(net, config.manifest.clone()),
            loader: ResourceLoader::new(host),
            collaborators,
            surface,
            state: StateTracker::new(events.clone()),
            events,
        })
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn state(&self) -> LoadState {
        self.state.current()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn collaborators(&self) -> &C {
        &self.collaborators
    }

    pub fn host(&self) -> &H {
        self.loader.host()
    }

    /// Run one attempt and present any failure.
    ///
    /// Returns the terminal state: `Ready`, or `Failed` with the message the
    /// error region now shows.
    pub async fn boot(&self, params: ModParams) -> LoadState {
        if let Err(error) = self.run(&params).await {
            RecoveryPresenter::new(&self.surface)
                .present(&error, &params)
                .await;
        }
        self.state.current()
    }

    /// Run one attempt. Failures move the state to `Failed` but are not
    /// presented.
    pub async fn run(&self, params: &ModParams) -> LoadResult<()> {
        self.state.reset();
        let result = self.attempt(params).await;
        if let Err(error) = &result {
            self.state.advance(LoadState::Failed(error.to_string()));
            self.events.publish(LoadEvent::Failed {
                error: error.to_string(),
            });
        }
        result
    }

    async fn attempt(&self, params: &ModParams) -> LoadResult<()> {
        let reference = params.clone().into_reference()?;
        info!(%reference, "loading mod");

        self.state.advance(LoadState::ResolvingVersion);
        let version = self
            .versions
            .resolve(
                reference.owner(),
                reference.repository(),
                reference.branch(),
            )
            .await?;
        self.events.publish(LoadEvent::VersionResolved {
            commit_id: version.commit_id().to_string(),
            base_url: version.base_url().to_string(),
        });

        self.state.advance(LoadState::ResolvingManifest);
        let mut manifest = self.manifests.resolve(&version, reference.mode()).await?;
        self.events.publish(LoadEvent::ManifestResolved {
            mode: manifest.mode(),
            scripts: manifest.script_count(),
        });

        self.state.advance(LoadState::LoadingResources);
        self.load_group(Phase::Before, manifest.before()).await?;
        if let Some(entry_point) = manifest.entry_point() {
            self.load_group(Phase::EntryPoint, entry_point).await?;
        }

        manifest.splice_extensions(self.collaborators.extension_files());
        self.load_group(Phase::Extensions, manifest.extensions())
            .await?;
        self.load_group(Phase::After, manifest.after()).await?;

        // Nothing on the page changes and nothing runs until both hooks exist.
        self.collaborators
            .check_hooks()
            .map_err(LoadError::Startup)?;

        if let Some(content) = manifest.content() {
            self.surface.replace_content(Region::App, content);
        }

        self.collaborators.start().map_err(LoadError::Startup)?;
        self.surface.hide(Region::Loading);
        self.surface.show(Region::App);
        if let Err(reason) = self.collaborators.attach_input_handler() {
            self.surface.hide(Region::App);
            return Err(LoadError::Startup(reason));
        }

        self.state.advance(LoadState::Ready);
        Ok(())
    }

    async fn load_group(&self, phase: Phase, group: &ScriptGroup) -> LoadResult<()> {
        debug!(%phase, scripts = group.len(), "loading group");
        self.events.publish(LoadEvent::GroupStarted {
            phase,
            scripts: group.len(),
        });
        self.loader.append_group(group).await?;
        self.events.publish(LoadEvent::GroupCompleted { phase });
        Ok(())
    }
}

fn parse_base(base: &str) -> LoadResult<Url> {
    Url::parse(base).map_err(|error| LoadError::Config(format!("{base}: {error}")))
}
