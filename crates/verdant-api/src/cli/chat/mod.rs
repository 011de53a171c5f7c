//! Interactive CLI chat experience for Verdant.
//!
//! This module implements the chat loop: a spinner while a reply is pending,
//! Ctrl+C cancellation of the in-flight request, markdown rendering of
//! replies, and slash commands over the saved-chat list. Entry point:
//! `loop_runner::run_chat`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
