pub mod keyword;
pub mod match_record;
pub mod run;
pub mod text_unit;

pub use keyword::{clean_keyword, KeywordEntry, KeywordSet};
pub use match_record::MatchRecord;
pub use run::RunSummary;
pub use text_unit::TextUnit;
