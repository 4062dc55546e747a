//! Core data model: the request, the compression output, and outgoing envelopes.

pub mod artifact;
pub mod attachment;
pub mod envelope;
pub mod request;
