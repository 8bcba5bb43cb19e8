pub mod account;
pub mod favorite;
pub mod part;
pub mod search_history;
