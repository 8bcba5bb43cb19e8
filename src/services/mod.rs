pub mod identity;
pub use identity::{IdentityError, IdentityService};

pub mod recommendation;
pub use recommendation::{ProductQuery, ProductResult, RecommendationService};

pub mod vehicle;
pub use vehicle::VehicleService;
