use super::SiteArgs;
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use log::{info, warn};

/// Check whether the catalog site is still reachable.
#[derive(Debug, Clone, Args)]
pub struct Check {
    /// Base url to switch to when the configured one is not reachable.
    #[arg(long)]
    pub fallback: Option<String>,
}

impl Check {
    pub async fn execute(self, site: &SiteArgs) -> Result<()> {
        let catalog = site.catalog()?;

        if catalog.check_url().await {
            println!("{}", catalog.config().base_url());
            return Ok(());
        }

        warn!("{} is not valid anymore", catalog.config().base_url());

        let Some(fallback) = self.fallback else {
            bail!("{} is not reachable.", catalog.config().base_url());
        };

        info!("Updating url to {}", fallback.as_str().bold());
        let config = catalog.config().clone().with_base_url(&fallback);
        let catalog = crate::catalog::Catalog::new(site.client()?, config);

        if !catalog.check_url().await {
            bail!("{} is not reachable either.", fallback);
        }

        println!("{}", catalog.config().base_url());
        Ok(())
    }
}
