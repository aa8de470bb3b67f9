//! Search layer facade.
//!
//! This module provides the search infrastructure for artsearch, including:
//!
//! - **[`composite`]**: Embedding input assembly from selected record fields.
//! - **[`embedder`]**: Embedder trait for semantic search (hash and ML implementations).
//! - **[`embedder_registry`]**: Embedder registry for backend selection and availability.
//! - **[`engine`]**: Query lifecycle, result shaping, and atomic corpus rebuild.
//! - **[`fastembed_embedder`]**: FastEmbed-backed ML embedder (MiniLM, local files only).
//! - **[`hash_embedder`]**: FNV-1a feature hashing embedder (deterministic fallback).
//! - **[`vector_index`]**: Dense per-record vectors with exact cosine top-K scan.

pub mod composite;
pub mod embedder;
pub mod embedder_registry;
pub mod engine;
pub mod fastembed_embedder;
pub mod hash_embedder;
pub mod vector_index;
