mod client;

pub use client::{ChatworkClient, CHATWORK_API};
