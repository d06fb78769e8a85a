//! Translate hotel search, availability and booking requests into query descriptors.

pub mod translation;
