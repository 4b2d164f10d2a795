//! Dashboard module
//!
//! Provides an overview page showing spending against the user's budget limits,
//! progress towards their savings goal and charts of their expenses.

mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
