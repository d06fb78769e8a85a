pub mod error;
pub mod helpers;
pub mod mutation;
pub mod query;
pub mod request;
pub mod values;
