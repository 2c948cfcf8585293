use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use qb_core::DedupConfig;
use qb_engine::{DedupPipeline, DedupReport, ResolveStatus, ScanStatus};
use qb_store::JsonlStore;
use tokio_util::sync::CancellationToken;

/// Find and remove near-duplicate questions in a corpus file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSONL corpus file, one document per line.
    #[arg(short, long, env = "QBANK_CORPUS")]
    corpus: PathBuf,

    /// Confirm deletion of all duplicates found. Without this flag the run
    /// is read-only and only reports what would be removed.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Minimum option-overlap ratio for the fuzzy merge pass.
    #[arg(long, default_value_t = DedupConfig::default().merge_threshold)]
    threshold: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "qb_engine=info,qb_store=info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let store = JsonlStore::open(&args.corpus)
        .with_context(|| format!("failed to open corpus {}", args.corpus.display()))?;
    let config = DedupConfig {
        merge_threshold: args.threshold,
        ..DedupConfig::default()
    };
    let pipeline = DedupPipeline::with_config(Arc::new(store), config);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let report = pipeline.run(args.yes, &cancel).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &DedupReport) {
    println!(
        "scanned {} documents ({} malformed)",
        report.scan_stats.scanned, report.scan_stats.malformed
    );
    if report.scan_status == ScanStatus::Cancelled {
        println!("scan was cancelled; results below are partial and nothing was deleted");
    }
    println!("{} duplicate groups found", report.groups.len());

    for (index, (key, group)) in report.groups.iter().enumerate() {
        let ids: Vec<&str> = group.iter().map(|m| m.id.as_str()).collect();
        println!("\ngroup {} [{}]", index + 1, &key[..key.len().min(8)]);
        println!("  preview: {}", group[0].title_preview);
        println!("  members: {}", ids.join(", "));
    }

    let resolution = &report.resolution;
    match resolution.status {
        ResolveStatus::Applied => {
            println!(
                "\ndeleted {} of {} duplicates ({} failed)",
                resolution.deleted, resolution.duplicates, resolution.failed
            );
        }
        ResolveStatus::Declined => {
            if resolution.duplicates > 0 {
                println!(
                    "\nno deletions performed; rerun with --yes to delete {} duplicates",
                    resolution.duplicates
                );
            } else {
                println!("\nno duplicates to delete");
            }
        }
    }
}
