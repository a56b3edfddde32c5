//! LanditAI backend API client.

mod auth;
mod client;
mod dto;
mod generation;
mod workspace;

pub use client::ApiClient;
