// Pedantic lint configuration for the crate.
// - cast_possible_truncation: positions and counts stay far below u32 limits
// - cast_sign_loss / cast_possible_wrap: SQLite integers are non-negative here
// - cast_precision_loss: averages over small counts
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - module_name_repetitions: DocxExtractor in extract::docx reads fine
// - similar_names: Variable naming is contextually clear
// - fn_params_excessive_bools: CLI flags are naturally boolean
// - needless_pass_by_value: Sometimes clearer semantically
// - match_same_arms: Combined arms can reduce readability
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::fn_params_excessive_bools,
    clippy::needless_pass_by_value,
    clippy::match_same_arms
)]

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod locate;
pub mod logging;
pub mod models;
pub mod operations;
