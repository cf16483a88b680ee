//! Build-host orchestration.
//!
//! Mirrors the lifecycle hook of a build extension: compute once, publish
//! one property, never abort the host. Every pipeline failure is reported
//! through the injected log and swallowed; downstream consumers must
//! tolerate an absent or empty property value.

use crate::error::Result;
use crate::host::{BuildLog, PropertySink};
use crate::resolver::DiffResolver;

/// Default property key under which the class list is published.
pub const DIFF_CLASSES_PROPERTY: &str = "git.diff.classes";

/// Run the full pipeline and publish the result.
///
/// Resolves the default branch, computes the changed-class list, joins it
/// with commas (empty string when nothing matched), and publishes it under
/// the configured property key. On any failure the error is logged as
/// fatal and swallowed; the function always returns normally.
pub fn publish_diff_classes(
    resolver: &DiffResolver,
    properties: &mut dyn PropertySink,
    log: &dyn BuildLog,
) {
    if let Err(err) = try_publish(resolver, properties, log) {
        log.fatal_error("failed to publish changed-class list", &err);
    }
}

fn try_publish(
    resolver: &DiffResolver,
    properties: &mut dyn PropertySink,
    log: &dyn BuildLog,
) -> Result<()> {
    let branch = resolver.default_branch(log)?;
    log.info(&format!("Default branch is '{}'", branch));

    let classes = resolver.diff_classes(&branch, log)?;
    log.info(&format!("Changed classes: [{}]", classes.join(", ")));

    properties.put(&resolver.config().property_key, &classes.join(","))?;
    Ok(())
}
