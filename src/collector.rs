//! Drives the identifier range through fetch → scan and accumulates records.

use anyhow::{bail, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::fetch::Fetch;
use crate::model::{LabRecord, Outcome};
use crate::parser::scan_page;
use crate::urls;

pub struct CollectorConfig {
    /// Highest accreditation number to try (the registry has no index to
    /// derive this from; numbers past the last real lab come back Absent).
    pub ceiling: u32,
    /// Record failed identifiers and keep scanning instead of aborting.
    pub keep_going: bool,
}

/// Everything one run produced, in identifier order.
pub struct Harvest {
    pub records: Vec<LabRecord>,
    pub scanned: u32,
    pub absent: u32,
    pub failed: Vec<(u32, String)>,
}

impl Harvest {
    pub fn print_summary(&self) {
        println!(
            "Scanned {} pages: {} records, {} absent, {} failed.",
            self.scanned,
            self.records.len(),
            self.absent,
            self.failed.len()
        );
        for (id, reason) in &self.failed {
            println!("  failed {}: {}", urls::number_for(*id), reason);
        }
    }
}

/// Scan identifiers 1..=ceiling. Absent pages are skipped; failed pages
/// abort the run unless `keep_going` is set, since they signal systematic
/// data loss rather than a gap in the registry.
pub async fn collect<F: Fetch>(fetcher: &F, config: &CollectorConfig) -> Result<Harvest> {
    let today = Local::now().date_naive();

    let pb = ProgressBar::new(u64::from(config.ceiling));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut harvest = Harvest {
        records: Vec::new(),
        scanned: 0,
        absent: 0,
        failed: Vec::new(),
    };

    for id in 1..=config.ceiling {
        let number = urls::number_for(id);
        let outcome = match fetcher.fetch(&urls::address_for(id)).await {
            Ok(contents) => scan_page(&number, &contents, today),
            Err(e) => Outcome::Failed(format!("fetch failed: {e}")),
        };
        harvest.scanned += 1;

        match outcome {
            Outcome::Record(record) => harvest.records.push(*record),
            Outcome::Absent => {
                debug!("{number}: absent");
                harvest.absent += 1;
            }
            Outcome::Failed(reason) => {
                warn!("{number}: {reason}");
                if !config.keep_going {
                    pb.finish_and_clear();
                    bail!("{number}: {reason} (use --keep-going to skip and continue)");
                }
                harvest.failed.push((id, reason));
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(harvest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapFetcher {
        pages: HashMap<String, String>,
    }

    impl Fetch for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no page at {url}"))
        }
    }

    fn page(number: &str) -> String {
        format!(
            "<p><strong>Akredytacja:</strong> {number}</p>\n\
             <p><strong>Data ważności certyfikatu:</strong> 01-01-2099</p>\n\
             <p><strong>Akredytacja od:</strong> 03-08-2018</p>\n\
             <p><strong>Dane organizacji:</strong></p>\n\
             <p>Org</p>\n\
             <p>Org addr</p>\n\
             <p><strong>Dane laboratorium:</strong></p>\n\
             <p>Lab</p>\n\
             <p>Lab addr</p>\n\
             <p><strong>Telefon:</strong></p>\n\
             <p>13 432-59-23</p>\n\
             <p><strong>Telefon komórkowy:</strong> brak</p>\n\
             <p><strong>E-mail:</strong></p>\n\
             <p>lab@example.pl</p>\n\
             <p><strong>Strona www:</strong></p>\n\
             <p>brak</p>\n"
        )
    }

    const ABSENT_PAGE: &str = "<p><strong>Akredytacja:</strong> </p>";

    #[tokio::test]
    async fn skips_absent_and_keeps_identifier_order() {
        let pages = HashMap::from([
            (urls::address_for(1), page("AB 001")),
            (urls::address_for(2), ABSENT_PAGE.to_string()),
            (urls::address_for(3), page("AB 003")),
        ]);
        let fetcher = MapFetcher { pages };
        let config = CollectorConfig {
            ceiling: 3,
            keep_going: false,
        };
        let harvest = collect(&fetcher, &config).await.unwrap();
        assert_eq!(harvest.scanned, 3);
        assert_eq!(harvest.absent, 1);
        let numbers: Vec<_> = harvest.records.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["AB 001", "AB 003"]);
    }

    #[tokio::test]
    async fn aborts_on_failure_by_default() {
        let pages = HashMap::from([(urls::address_for(1), "<p>garbage</p>".to_string())]);
        let fetcher = MapFetcher { pages };
        let config = CollectorConfig {
            ceiling: 1,
            keep_going: false,
        };
        assert!(collect(&fetcher, &config).await.is_err());
    }

    #[tokio::test]
    async fn keep_going_records_failures() {
        let pages = HashMap::from([
            (urls::address_for(1), "<p>garbage</p>".to_string()),
            (urls::address_for(2), page("AB 002")),
        ]);
        let fetcher = MapFetcher { pages };
        let config = CollectorConfig {
            ceiling: 2,
            keep_going: true,
        };
        let harvest = collect(&fetcher, &config).await.unwrap();
        assert_eq!(harvest.records.len(), 1);
        assert_eq!(harvest.failed.len(), 1);
        assert_eq!(harvest.failed[0].0, 1);
    }
}
