pub mod logger;
pub mod url_parts;
