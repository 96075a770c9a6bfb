pub mod config;
pub mod inspect;
pub mod templates;
pub mod wrap;
pub mod wrap_html;
