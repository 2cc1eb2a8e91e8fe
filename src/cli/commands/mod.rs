//! Command implementations

mod documents;
mod goto;
mod init;
mod parse;
mod report;
mod reset;
mod review;
mod set;
mod status;
mod upload;

use std::path::Path;

use anyhow::bail;

use docreview::api::ApiClient;
use docreview::config::AppConfig;
use docreview::output::OutputMode;
use docreview::paths;
use docreview::router::{Navigation, RouteParams, Router, Step};
use docreview::storage::FileKeyValueStore;
use docreview::store::WorkflowStore;

pub use documents::{document, documents};
pub use goto::goto;
pub use init::init;
pub use parse::{parse, parse_result};
pub use report::report;
pub use reset::reset;
pub use review::{review, review_result};
pub use set::{Preference, set};
pub use status::status;
pub use upload::upload;

/// Everything a workflow command needs
#[derive(Debug)]
pub struct Context {
    pub config: AppConfig,
    pub router: Router,
    pub store: WorkflowStore<FileKeyValueStore>,
    pub mode: OutputMode,
}

impl Context {
    /// Load config and persisted state.
    ///
    /// With `recover`, a corrupt storage file is replaced instead of failing.
    pub fn load(
        config_path: Option<&Path>,
        mode: OutputMode,
        recover: bool,
    ) -> anyhow::Result<Self> {
        let config = AppConfig::load(config_path)?;
        let backend = if recover {
            FileKeyValueStore::open_or_reset(paths::storage_file())?
        } else {
            FileKeyValueStore::open(paths::storage_file())?
        };
        Ok(Self {
            router: config.router(),
            store: WorkflowStore::load(backend),
            config,
            mode,
        })
    }

    /// Client for the configured backend
    pub fn client(&self) -> anyhow::Result<ApiClient> {
        Ok(ApiClient::new(&self.config.api_config())?)
    }

    /// Pass the guard for `step`, or fail pointing at the step to run instead
    pub fn enter(&mut self, step: Step) -> anyhow::Result<RouteParams> {
        match self.router.navigate(step, &mut self.store) {
            Navigation::Allowed(route) => Ok(route.params),
            Navigation::Redirected { from, to, missing } => bail!(
                "{from} needs {missing}, which is not set. Run `docreview {}` first",
                command_for(to.step)
            ),
        }
    }
}

/// Command that performs `step`
const fn command_for(step: Step) -> &'static str {
    match step {
        Step::Upload => "upload <FILE>",
        Step::Parse => "parse",
        Step::Review => "review",
        Step::Report => "report",
    }
}

/// Pick an explicit id, else the stored one, else explain which step makes one
fn id_or_stored(explicit: Option<&str>, stored: Option<&str>, step: Step) -> anyhow::Result<String> {
    match explicit.or(stored) {
        Some(id) => Ok(id.to_string()),
        None => bail!("no id given and none stored. Run `docreview {}` first", command_for(step)),
    }
}
