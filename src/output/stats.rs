//! Statistics for one enrichment run
//!
//! Counts every record by the outcome of both stages so a run can be judged at a
//! glance, and prints the summary after the output file is written.

use crate::pipeline::BatchReport;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Batch statistics summary
#[derive(Debug, Clone)]
pub struct BatchStatistics {
    /// Number of input records
    pub total_records: u64,

    /// Records that got a website
    pub websites_found: u64,

    /// Websites the scraper actually requested
    pub sites_scraped: u64,

    /// Records that got a verified email
    pub emails_found: u64,

    /// Count of records by lookup outcome label
    pub lookups_by_kind: HashMap<&'static str, u64>,

    /// Count of records by scrape outcome label
    pub scrapes_by_kind: HashMap<&'static str, u64>,

    /// When the pipeline started
    pub started_at: DateTime<Utc>,

    /// When the pipeline finished
    pub finished_at: DateTime<Utc>,
}

impl BatchStatistics {
    /// Tallies a finished run
    pub fn from_report(
        report: &BatchReport,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut lookups_by_kind = HashMap::new();
        for lookup in &report.lookups {
            *lookups_by_kind.entry(lookup.label()).or_insert(0) += 1;
        }

        let mut scrapes_by_kind = HashMap::new();
        for scrape in &report.scrapes {
            *scrapes_by_kind.entry(scrape.label()).or_insert(0) += 1;
        }

        Self {
            total_records: report.records.len() as u64,
            websites_found: report.records.iter().filter(|r| r.url.is_some()).count() as u64,
            sites_scraped: report.scrapes.iter().filter(|s| s.touched_network()).count() as u64,
            emails_found: report.scrapes.iter().filter(|s| s.is_verified()).count() as u64,
            lookups_by_kind,
            scrapes_by_kind,
            started_at,
            finished_at,
        }
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

fn percentage(count: u64, total: u64) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn print_breakdown(counts: &HashMap<&'static str, u64>, total: u64) {
    // Sort by count (descending), then label for a stable listing
    let mut counts: Vec<_> = counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (label, count) in counts {
        println!(
            "  {}: {} ({:.1}%)",
            label,
            count,
            percentage(*count, total)
        );
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &BatchStatistics) {
    println!("=== Enrichment Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Finished: {}", stats.finished_at.to_rfc3339());
    println!("  Duration: {}s", stats.duration_seconds());
    println!("  Companies: {}", stats.total_records);
    println!();

    println!("Website Lookups:");
    print_breakdown(&stats.lookups_by_kind, stats.total_records);
    println!();

    println!("Site Scrapes:");
    print_breakdown(&stats.scrapes_by_kind, stats.total_records);
    println!();

    println!(
        "Websites: {:.1}% ({} / {})",
        percentage(stats.websites_found, stats.total_records),
        stats.websites_found,
        stats.total_records
    );
    println!(
        "Emails: {:.1}% ({} / {}, {} sites scraped)",
        percentage(stats.emails_found, stats.total_records),
        stats.emails_found,
        stats.total_records,
        stats.sites_scraped
    );
}
