//! `raze-api` — HTTP surface for the RAZE commerce core.

pub mod app;
