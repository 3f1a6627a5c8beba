pub mod format;
pub mod report;

pub use format::{DEFAULT_PRECISION, convert_data, convert_number};
pub use report::{print_report, write_report};
