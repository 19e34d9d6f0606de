// Jobflow state managers
// Managers hold view-side state: bookmarks, listing grids, cards and modals, admin forms, saved items.

pub mod admin_form;
pub mod bookmark_manager;
pub mod listing_card;
pub mod listing_view;
pub mod saved_items;
