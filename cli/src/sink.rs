//! Where confirmed open endpoints go.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::net::SocketAddrV4;
use std::path::Path;

use anyhow::Context;
use colored::*;
use tracing::error;

use sweepr_core::report::ResultSink;

/// Prints open endpoints and optionally appends them to a log file.
///
/// With a log file attached, stdout echoing only happens in verbose mode;
/// without one, every hit is printed.
pub struct OpenPortSink {
    logfile: Option<File>,
    verbose: bool,
}

impl OpenPortSink {
    pub fn new(path: Option<&Path>, verbose: bool) -> anyhow::Result<Self> {
        let logfile = match path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("cannot open log file {}", path.display()))?;
                Some(file)
            }
            None => None,
        };

        Ok(Self { logfile, verbose })
    }
}

impl ResultSink for OpenPortSink {
    fn on_open(&mut self, target: SocketAddrV4) {
        if let Some(file) = &mut self.logfile {
            // one endpoint per line, flushed so an interrupted run loses nothing
            let written = writeln!(file, "{}:{}", target.ip(), target.port())
                .and_then(|()| file.flush());
            if let Err(err) = written {
                error!(%err, "cannot write to log file");
            }
        }

        if self.verbose || self.logfile.is_none() {
            println!("{} {}", "Open".green().bold(), target);
        }
    }
}
