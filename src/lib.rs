pub mod config;
pub mod date;
pub mod html;
pub mod lookup;
pub mod receipt;
pub mod report;
pub mod scrape;
pub mod status;
pub mod times;
