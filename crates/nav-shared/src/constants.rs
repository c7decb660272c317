//! Application-wide constants

/// Cap on quick-add catalog results per content type.
pub const DEFAULT_QUICK_ADD_LIMIT: u32 = 50;
pub const MAX_QUICK_ADD_LIMIT: u32 = 500;

pub const DEFAULT_MAX_SLUG_ATTEMPTS: u32 = 100;
pub const DEFAULT_MAX_WRITE_RETRIES: u32 = 3;

pub const MAX_SLUG_LENGTH: usize = 190;
pub const DEFAULT_MENU_SLUG: &str = "menu";

pub const MAX_MENU_NAME_LENGTH: u64 = 100;
pub const MAX_ITEM_TITLE_LENGTH: u64 = 255;

/// Header carrying the authenticated administrator, set by the auth gateway.
pub const ADMIN_ACTOR_HEADER: &str = "x-admin-actor";
