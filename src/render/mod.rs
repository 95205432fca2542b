// Presentation layer: HTML for the table, SVG for the chart, and the page around them.

pub mod chart;
pub mod format;
pub mod page;
pub mod table;
