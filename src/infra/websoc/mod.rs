mod client;

pub use client::WebSocClient;
