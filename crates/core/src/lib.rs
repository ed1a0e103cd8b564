//! Domain model and editing engine for the page-content studio.
//!
//! Pages hold ordered sections of documents, audio items, and content
//! blocks, gated by a year filter. This crate owns the canonical in-memory
//! tree, the tolerant normalizer for raw backend payloads, the wire
//! serializer, the mutation protocol, and the single-focus editing session
//! with its asset-ingestion seam. All network I/O lives behind traits and is
//! implemented by the client crate.

pub mod editing;
pub mod events;
pub mod ingest;
pub mod mutation;
pub mod normalize;
pub mod page;
pub mod store;
pub mod wire;
