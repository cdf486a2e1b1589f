use serde::{Deserialize, Serialize};

use sheetnest::util::NestConfig;

use crate::io::svg_util::SvgDrawOptions;

/// Configuration of a command line run.
/// A plain [`NestConfig`] is a valid configuration file as well: the drawing options have defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CliConfig {
    #[serde(flatten)]
    pub nest: NestConfig,
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}
