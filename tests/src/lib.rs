//! End-to-end checks of the discovery and layout engines, driven by fake
//! interface tables and fake probers instead of a live network.

mod discovery;
mod layout;
mod utils;
