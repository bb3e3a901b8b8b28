#![allow(dead_code)]

pub mod mock_store;
pub mod origin_server;
