// src/lib.rs

pub mod client;
pub mod common;
pub mod config;
pub mod db;
pub mod format;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod stores;
pub mod wizard;
