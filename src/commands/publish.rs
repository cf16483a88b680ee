//! Implementation of the `classdiff publish` command.
//!
//! This is the build-host entry point in CLI form: run the pipeline once,
//! publish one property, never fail the caller. Pipeline errors are logged
//! as fatal and swallowed, so a wrapping build sees exit 0 and simply no
//! published value.

use crate::cli::PublishArgs;
use crate::commands::build_resolver;
use crate::error::Result;
use crate::extension::publish_diff_classes;
use crate::host::{ConsoleLog, PropertiesFile, PropertySink, StdoutProperties};

/// Execute the `classdiff publish` command.
///
/// Argument and config errors still propagate (the host was asked to run
/// the tool in a way that cannot work); only the pipeline itself is under
/// the swallow-and-log policy.
pub fn cmd_publish(args: PublishArgs) -> Result<()> {
    let resolver = build_resolver(args.dir, args.config)?;
    let log = ConsoleLog;

    let mut file_sink;
    let mut stdout_sink;
    let sink: &mut dyn PropertySink = match args.output {
        Some(path) => {
            file_sink = PropertiesFile::new(path);
            &mut file_sink
        }
        None => {
            stdout_sink = StdoutProperties;
            &mut stdout_sink
        }
    };

    publish_diff_classes(&resolver, sink, &log);
    Ok(())
}
