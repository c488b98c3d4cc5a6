use super::SiteArgs;
use crate::catalog::{SearchOptions, Title};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Search the catalog for movies and series.
#[derive(Debug, Clone, Args)]
pub struct Search {
    /// Name of the title.
    #[arg(required = true)]
    pub name: String,

    /// Maximum number of search records to look at.
    #[arg(short, long, default_value_t = 3)]
    pub max_results: usize,

    /// Keep only titles whose name equals the searched one, ignoring case.
    #[arg(long)]
    pub exact: bool,

    /// With --exact, keep titles sharing at least half of the searched words.
    #[arg(long, requires = "exact")]
    pub estimate: bool,

    /// Print results in json format.
    #[arg(long)]
    pub json: bool,
}

impl Search {
    pub async fn execute(self, site: &SiteArgs) -> Result<()> {
        let options = SearchOptions {
            max_results: self.max_results,
            match_exact: self.exact,
            match_estimate: self.estimate,
        };
        let titles = site.catalog()?.search(&self.name, &options).await?;

        if self.json {
            serde_json::to_writer_pretty(std::io::stdout(), &titles)?;
            println!();
        } else {
            titles.iter().for_each(print_title);
        }

        Ok(())
    }
}

fn print_title(title: &Title) {
    println!(
        "{} {} (id: {}, scws_id: {})",
        title.friendly_name.bold(),
        title.release_date.as_deref().unwrap_or_default().dimmed(),
        title.id,
        title
            .scws_id
            .map(|x| x.to_string())
            .unwrap_or_else(|| "-".to_owned()),
    );

    for season in &title.seasons {
        println!("  {} {}", "Season".cyan(), season.number);

        for episode in &season.episodes {
            println!(
                "    {:>3}. {} (id: {}, scws_id: {})",
                episode.number,
                episode.name.as_deref().unwrap_or_default(),
                episode.id,
                episode
                    .scws_id
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| "-".to_owned()),
            );
        }
    }
}
