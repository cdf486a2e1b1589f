use serde::{Deserialize, Serialize};

use sheetnest::io::ext_repr::{ExtSolution, NestRequest};
use sheetnest_remote::SolutionSource;

use crate::config::CliConfig;

/// Contents of a `sol_<stem>.json` file
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NestOutput {
    #[serde(flatten)]
    pub request: NestRequest,
    pub solution: ExtSolution,
    pub source: SolutionSource,
    pub config: CliConfig,
}
