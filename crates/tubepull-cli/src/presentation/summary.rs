//! End-of-run summary.

use tubepull_core::PoolReport;

/// Print the counts of a pool run, then one line per failed item.
pub fn print_summary(report: &PoolReport) {
    println!();
    println!(
        "Downloaded: {}  Skipped: {}  Failed: {}",
        report.completed.len(),
        report.skipped.len(),
        report.failed.len()
    );

    if report.has_failures() {
        println!();
        println!("Failed items:");
        for failed in &report.failed {
            let label = if failed.item.title.is_empty() {
                &failed.item.id
            } else {
                &failed.item.title
            };
            println!("  {} ({}): {}", label, failed.item.id, failed.error);
        }
    }
}
