pub(crate) mod date;
pub(crate) mod debug;
pub(crate) mod timezone;

pub(crate) use date::{parse_date, parse_key_date};
pub use debug::{debug_enabled, set_debug};
pub use timezone::Timezone;
