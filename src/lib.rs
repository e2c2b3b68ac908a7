#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod handshake;
pub mod link;
pub mod messages;
pub mod protocol;
pub mod queue;
pub mod router;
