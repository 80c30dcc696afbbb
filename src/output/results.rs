use crate::crawler::CrawlReport;
use std::io::{self, Write};

/// Header printed above a non-empty result listing
const RESULTS_HEADER: &str = "Search results:";

/// Line printed when a search matched nothing
const NO_RESULTS: &str = "No results found.";

/// Writes a search result listing
///
/// Non-empty results produce a header line followed by one `- <url>` line
/// per result, in input order. Empty results produce a single
/// `No results found.` line.
pub fn write_results<W: Write, S: AsRef<str>>(out: &mut W, results: &[S]) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "{}", NO_RESULTS);
    }

    writeln!(out, "{}", RESULTS_HEADER)?;
    for url in results {
        writeln!(out, "- {}", url.as_ref())?;
    }

    Ok(())
}

/// Prints a search result listing to stdout
pub fn print_results<S: AsRef<str>>(results: &[S]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_results(&mut handle, results)
}

/// Writes a one-paragraph summary of a finished crawl
pub fn write_summary<W: Write>(out: &mut W, report: &CrawlReport) -> io::Result<()> {
    writeln!(out, "Crawled from: {}", report.seed)?;
    writeln!(out, "  Outcome: {}", report.outcome)?;
    writeln!(
        out,
        "  Pages: {} visited, {} indexed, {} failed",
        report.pages_visited, report.pages_indexed, report.pages_failed
    )?;
    writeln!(out, "  Elapsed: {:.2}s", report.elapsed.as_secs_f64())
}

/// Prints a crawl summary to stderr, keeping stdout for the result listing
pub fn print_summary(report: &CrawlReport) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    write_summary(&mut handle, report)
}
