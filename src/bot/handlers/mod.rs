//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for class labels and exam types
pub mod autocomplete;
