//! Shared UI crate for Javelink: the upload form, result panels and the
//! client that talks to `/api/analyze`.

pub mod analysis;
pub mod core;
pub mod i18n;
pub mod results;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
