pub mod xlsx;

pub use xlsx::{read_report, write_report};
