use std::{fs, fs::OpenOptions, path::Path, sync::Arc};

use tokio::runtime::Runtime;
use tracing::{Dispatch, dispatcher::DefaultGuard};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::error::AppResult;

const DEFAULT_FILTER: &str = "info,filmetl=debug,sqlx=warn";

/// Subscriber for one run: stdout plus an appending log file.
///
/// Nothing is installed globally: [`RunLogger::enter`] makes it the current
/// thread's default until the returned guard drops, and [`RunLogger::runtime`]
/// builds a current-thread runtime whose blocking-pool threads (DNS lookups,
/// file IO) log here too.
pub struct RunLogger {
    dispatch: Dispatch,
}

impl RunLogger {
    pub fn new(log_file: &Path) -> AppResult<Self> {
        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(log_file)?;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)));

        Ok(Self { dispatch: Dispatch::new(subscriber) })
    }

    pub fn enter(&self) -> DefaultGuard {
        tracing::dispatcher::set_default(&self.dispatch)
    }

    pub fn runtime(&self) -> AppResult<Runtime> {
        let dispatch = self.dispatch.clone();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .on_thread_start(move || {
                // Pool threads keep the subscriber until they exit.
                std::mem::forget(tracing::dispatcher::set_default(&dispatch));
            })
            .build()?;
        Ok(runtime)
    }
}
