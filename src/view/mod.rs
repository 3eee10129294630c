//! View-state controller for the portfolio page.
//!
//! Each subsystem is a small state machine that reads raw input (scroll
//! offset, pointer position, clicks, timers) and produces derived state.
//! `controller::ViewController` wires them together and is the only place
//! that writes to the document, once per frame.

pub mod controller;
pub mod counter;
pub mod form;
pub mod menu;
pub mod modal;
pub mod parallax;
pub mod pointer;
pub mod registry;
pub mod reveal;
pub mod scroll;
pub mod sections;
pub mod state;

pub use controller::{ViewAction, ViewController};
