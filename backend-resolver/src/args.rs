use crate::{fixture::Fixture, TracingDiagnostics};
use anyhow::{Context, Result};
use clap::Parser;
use std::{io::Write, path::PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
#[clap(
    name = "ingress-backend-resolver",
    about = "Resolves ingress backend directives against a cluster snapshot"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "ingress_backend_resolver=info,warn",
        env = "INGRESS_BACKEND_RESOLVER_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    /// Notices at or below this level are logged at `info`.
    #[clap(short, long, default_value = "0")]
    verbosity: u8,

    /// A YAML file with the routes to resolve and the pods, secrets and hosts they refer to.
    fixture: PathBuf,
}

// === impl Args ===

impl Args {
    #[inline]
    pub fn parse_and_run() -> Result<()> {
        Self::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            verbosity,
            fixture,
        } = self;

        log_format.try_init(log_level)?;

        let routes = Fixture::load(&fixture)?;
        info!(
            fixture = %fixture.display(),
            routes = routes.routes.len(),
            "Resolving backends"
        );
        let resolution = routes.resolve(&TracingDiagnostics::new(verbosity));

        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &resolution)
            .context("failed to write resolved backends")?;
        writeln!(stdout)?;
        Ok(())
    }
}
