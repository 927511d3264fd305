pub mod label;
pub mod row;
pub mod rule;
pub mod spacing;
pub mod zone;

pub use label::{whole_metres, Label, NOT_ADMISSIBLE};
pub use row::JoinedRow;
pub use rule::{RuleRecord, RuleTable};
pub use spacing::Spacing;
pub use zone::{ZoneRecord, ZoneTable};
