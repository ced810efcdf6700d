//! Key resolution: scope joining, plural suffixes and namespace routing.

mod key;
pub mod plural;

pub use key::{
    CUSTOMER_KEY_ROOT,
    KEY_SEPARATOR,
    customer_store_name,
    is_child_key,
    last_segment,
    prepare_key,
    top_level_segment,
};
pub use plural::{
    PluralCategory,
    PluralRule,
};
