pub mod abstract_trait;
pub mod cli;
pub mod client;
pub mod di;
pub mod domain;
pub mod events;
pub mod handler;
pub mod middleware;
pub mod navigation;
pub mod service;
pub mod state;
