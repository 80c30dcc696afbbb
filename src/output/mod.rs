//! Output module for presenting search results and crawl summaries
//!
//! Everything here writes to an `io::Write` so the exact text can be
//! checked in tests. Result listings go to stdout and crawl summaries to
//! stderr.

mod results;

pub use results::{print_results, print_summary, write_results, write_summary};
