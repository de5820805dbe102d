//! The alias scan: authenticate, list, select, resolve, compare.

use crate::context::{AppContext, VerbosityLevel};
use crate::format;
use libtagalias::{
    Client, ClientConfig, DigestMatcher, NotFoundPolicy, Result, TagAliasError, select_tags,
};
use std::io::Write;

/// Counters reported at the end of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Tags in the repository before filtering
    pub total_tags: usize,
    /// Candidate tags whose digest was requested
    pub candidates: usize,
    /// Candidate tags sharing the target's digest
    pub matches: usize,
}

/// Run one scan and write each matching tag to `out` as soon as it is found
///
/// Everything except the matching tag names goes to stderr.
pub fn run<W: Write>(ctx: &AppContext, out: &mut W) -> Result<ScanSummary> {
    let settings = &ctx.settings;
    let repository = settings.reference.repository();
    let tag = settings.reference.tag();

    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Looking up aliases of {}", settings.reference),
    );
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Registry: {}", settings.registry_url),
    );
    format::print(
        ctx,
        VerbosityLevel::Trace,
        &format!(
            "Token service: {} (service {}), limit {}, filter '{}', delay {:?}, timeout {}s",
            settings.token_service.url,
            settings.token_service.service,
            settings.limit,
            settings.filter,
            settings.request_delay,
            settings.timeout_seconds
        ),
    );

    let config = ClientConfig::new().with_timeout(settings.timeout_seconds);
    let client = Client::with_config(&settings.registry_url, config)?;

    let token = client.authenticate(&settings.token_service, repository)?;
    format::print(ctx, VerbosityLevel::Trace, "Obtained pull token");

    let tags = client.fetch_tag_list(repository, &token)?;
    let selection = select_tags(&tags, &settings.filter, settings.limit);
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!(
            "Found {} tags, {} match the filter, checking {}",
            selection.total,
            selection.matched,
            selection.tags.len()
        ),
    );
    if selection.is_truncated() {
        format::warning(
            ctx,
            &format!(
                "Only the first {} of {} tags are checked; raise the limit (-l) to check more",
                selection.tags.len(),
                selection.matched
            ),
        );
    }

    let target = client
        .fetch_digest(repository, tag, &token, NotFoundPolicy::Fatal)?
        .ok_or_else(|| TagAliasError::missing_digest(settings.reference.to_string()))?;
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Target digest: {}", target),
    );

    let pb = format::progress_bar(ctx, selection.tags.len() as u64, "Checking tags");
    let matcher = DigestMatcher::new(settings.request_delay);

    let resolve = |candidate: &str| {
        format::print(
            ctx,
            VerbosityLevel::VeryVerbose,
            &format!("Resolving {}:{}", repository, candidate),
        );
        let digest = client.fetch_digest(repository, candidate, &token, NotFoundPolicy::Tolerate);
        pb.inc(1);

        match &digest {
            Ok(Some(digest)) => format::print(
                ctx,
                VerbosityLevel::Trace,
                &format!("{} -> {}", candidate, digest),
            ),
            Ok(None) => format::print(
                ctx,
                VerbosityLevel::Trace,
                &format!("{} has no digest, skipped", candidate),
            ),
            Err(_) => {}
        }
        digest
    };

    let mut matches = matcher.find_matches(&target, &selection.tags, resolve);
    let mut found = 0;
    for result in matches.by_ref() {
        let alias = match result {
            Ok(alias) => alias,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        found += 1;
        pb.suspend(|| -> std::io::Result<()> {
            writeln!(out, "{}", alias)?;
            out.flush()
        })
        .map_err(|e| TagAliasError::io("Failed to write to standard output", e))?;
    }
    pb.finish_and_clear();

    let summary = ScanSummary {
        total_tags: selection.total,
        candidates: matches.visited(),
        matches: found,
    };
    format::success(
        ctx,
        &format!(
            "Checked {} of {} tags, {} share the digest of {}",
            summary.candidates, summary.total_tags, summary.matches, settings.reference
        ),
    );

    Ok(summary)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
