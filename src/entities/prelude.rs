pub use super::accounts::Entity as Accounts;
pub use super::favorites::Entity as Favorites;
pub use super::parts::Entity as Parts;
pub use super::search_history::Entity as SearchHistory;
