pub mod cmi;
pub mod config;
pub mod constants;
pub mod core;
pub mod utils;

pub use cmi::{CmiArray, CmiElement, CmiScore, JsonMode, Lifecycle, ScoreSchema};
pub use config::{toml_config::CheckDocument, ArrayConfig, ScoreConfig};
pub use constants::Standard;
pub use core::runner::{CheckReport, CheckRunner, RejectedWrite};
pub use utils::error::{CmiError, Result};
pub use utils::validation::{check_valid_format, check_valid_range, ScoreRange};
