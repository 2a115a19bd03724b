//! HTTP protocol implementation
//!
//! This module provides HTTP/1.1 request framing, multipart decoding, and
//! the marketplace command handling.

pub mod add_pet;
pub mod buy_pet;
pub mod command;
pub mod http;
pub mod login;
pub mod multipart;
pub mod pets;
pub mod register;
pub mod uploads;

pub use command::Command;
pub use http::{Parser, Request, Response};
