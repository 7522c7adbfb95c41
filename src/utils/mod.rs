pub mod cookies;
pub mod redact;
pub mod suggest;
pub mod text;
pub mod url_parts;
