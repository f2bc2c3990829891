//! CRM contact entity.

pub mod model;

pub use model::Contact;
