//! Screen implementations. Each screen is a top-level Component.

pub mod product_form;
pub mod product_list;
