//! # Menu Voting Shared
//! This crate defines shared data structures and types used across the menu voting ecosystem.
//! It includes common definitions for menu items, vote records, the weekly menu state,
//! principals, and the computed weekly menu.
pub mod types;
