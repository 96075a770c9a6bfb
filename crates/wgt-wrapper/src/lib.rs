//! Compatibility wrapper packages
//!
//! Media that the content view cannot show directly (a Flash movie, a
//! QuickTime clip, ...) is wrapped into a generated widget package whose
//! `index.htm` embeds it. The embedding markup comes from templates shipped
//! in the application resources; see [`TemplateCache`]. Raw HTML fragments
//! get a fixed wrapper through [`create_html_wrapper`].

pub mod errors;
pub mod fs_utils;
pub mod substitute;
pub mod templates;
pub mod wrapper;

pub use errors::WrapperError;
pub use templates::{TemplateCache, WrapperTemplates, CONFIG_TEMPLATE_FILE, TEMPLATE_PREFIX};
pub use wrapper::{create_html_wrapper, create_wrapper, SizeHint, START_FILE};
