//! Site tracking: blocklist, topics and screen time, all keyed by the
//! normalized hostname.

mod blocklist;
mod normalize;
mod screen_time;
mod topics;

pub use blocklist::{
    add_recommended, add_to_blocklist, block_current_tab, blocklist, is_blocked,
    remove_from_blocklist, RECOMMENDED_SITES,
};
pub use normalize::{blockable_hostname, normalize_domain, tab_hostname};
pub use screen_time::{
    add_site_time, reset_site_time, site_time, usage_ranking, SiteTracker, SiteUsage,
    DEFAULT_TOP_N,
};
pub use topics::{add_topic, remove_topic, select_topic, topics, Topics};
