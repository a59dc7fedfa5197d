//! Unit tests for the owner dashboard.
