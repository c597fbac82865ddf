// Small nom parsers for cell typing, advisor answers and CLI positions

pub mod cell;
pub mod lexer;
pub mod pointer;
pub mod suggestion;

// Public API re-exports
pub use cell::parse_numeric_cell;
pub use pointer::parse_pointer;
pub use suggestion::parse_chart_type;
