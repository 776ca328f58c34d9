//! Find video files carrying embedded title/comment tags under approved roots,
//! report them, and strip the tags in bulk through an external sanitizer.

pub mod access;
pub mod clean;
pub mod cli;
pub mod config;
pub mod http;
pub mod media;
pub mod tools;
