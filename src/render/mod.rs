//! Page renderers for the parsed data: static HTML pages and JSON
//! documents. The parsers never write files; everything here returns
//! strings for the driver to place.

pub mod html;
pub mod json;
