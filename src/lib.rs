pub mod aggregate;
pub mod api;
pub mod feed;
pub mod http_client;
pub mod league_fetch;
pub mod state;
pub mod stats_fetch;
pub mod team_display;
