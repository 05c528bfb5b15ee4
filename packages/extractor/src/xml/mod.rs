//! XML utilities: default-namespace resolution and namespaced path lookups.

mod namespace;
mod utils;

pub use namespace::{clark, clark_name, NamespaceTable};
pub use utils::{
    attributes_of, find_all_by_path, find_attribute, find_attributes, find_by_path, find_child,
    find_text, get_tag_name, get_text,
};
