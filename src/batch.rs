//! Batch driver.
//!
//! Turns the input lines into rows, one per non-blank line, in input order.

use futures::future;
use futures::stream::{self, StreamExt};

use crate::app::{normalize_line, ProgressReporter};
use crate::fetch::{resolve_url, CheckContext};
use crate::models::ResolutionResult;

/// Resolves every URL of `lines`.
///
/// Blank lines and comments are skipped. With a concurrency above one, up to
/// that many URLs are in flight at once; `buffered` still yields the rows in
/// input order.
///
/// # Arguments
///
/// * `ctx` - Shared clients, resolver and statistics
/// * `lines` - Raw input lines
/// * `progress` - Ticked once per input line, skipped lines included
///
/// # Returns
///
/// One row per line that normalized to a URL, in input order.
pub async fn process_batch<S: AsRef<str>>(
    ctx: &CheckContext,
    lines: &[S],
    progress: &dyn ProgressReporter,
) -> Vec<ResolutionResult> {
    progress.start(lines.len() as u64);

    let rows = stream::iter(lines)
        .filter_map(|line| {
            let url = normalize_line(line.as_ref());
            if url.is_none() {
                progress.tick();
            }
            future::ready(url)
        })
        .map(|url| async move {
            let row = resolve_url(ctx, &url).await;
            progress.tick();
            row
        })
        .buffered(ctx.concurrency)
        .collect::<Vec<_>>()
        .await;

    progress.finish();
    rows
}
