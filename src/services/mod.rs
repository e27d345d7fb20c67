pub mod application_service;
pub mod application_service_impl;
pub use application_service::{ApplicationError, ApplicationService};
pub use application_service_impl::DefaultApplicationService;

pub mod listing_service;
pub mod listing_service_impl;
pub use listing_service::{ListingError, ListingService};
pub use listing_service_impl::CachedListingService;
