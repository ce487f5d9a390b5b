pub mod api;
pub mod demo_feed;
pub mod duels;
pub mod http_client;
pub mod provider;
pub mod session;
pub mod state;
