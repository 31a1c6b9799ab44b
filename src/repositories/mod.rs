//! Data access layer for the triplestore.
//!
//! Repositories wrap the store's queries and writes, using the
//! `FromContext` derive macro for dependency injection.

mod allowed_domain;
mod dataset;
mod registration;

pub use allowed_domain::AllowedDomainRepository;
pub use dataset::DatasetRepository;
pub use registration::RegistrationRepository;
