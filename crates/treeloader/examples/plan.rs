//! Print the script load order of a mod without running anything.
//!
//! ```
//! cargo run -p treeloader --example plan -- "user=foo&repo=bar&mode=full" [EXTENSION...]
//! ```
//!
//! Extension files are normally listed by the mod's own scripts; pass them
//! on the command line to see where they land.

use std::{env::args, error::Error};

use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;
use treeloader::{VersionResolver, manifest::ManifestResolver, prelude::*};
use url::Url;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::default()
                .add_directive("treeloader_net=warn".parse()?)
                .add_directive(LevelFilter::INFO.into()),
        )
        .with_line_number(false)
        .with_file(false)
        .init();

    let mut args = args().skip(1);
    let query = args.next().unwrap_or_else(|| "user=Acamaeda".to_string());
    let extensions: Vec<String> = args.collect();

    let config = LoaderConfig::default();
    let reference = ModParams::from_query_with(&query, &config.defaults).into_reference()?;
    info!(%reference, "planning");

    let net = HttpClient::new(&config.net)?;
    let versions = VersionResolver::new(
        net.clone(),
        Url::parse(&config.api_base)?,
        Url::parse(&config.cdn_base)?,
    )?;
    let version = versions
        .resolve(
            reference.owner(),
            reference.repository(),
            reference.branch(),
        )
        .await?;

    let manifests = ManifestResolver::new(net, config.manifest.clone());
    let mut manifest = manifests.resolve(&version, reference.mode()).await?;
    manifest.splice_extensions((!extensions.is_empty()).then_some(extensions));

    for (phase, group) in manifest.phases() {
        println!("# {phase}");
        for url in group.urls() {
            println!("{url}");
        }
    }
    Ok(())
}
