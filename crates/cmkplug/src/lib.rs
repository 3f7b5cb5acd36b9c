//! cmkplug - run the Checkmk plugins of this workspace outside a site.
//!
//! Feeds saved special agent output through discovery, checks and
//! inventory, prints the rule parameters and agent command lines the
//! configuration produces, and renders the GUI elements as HTML.

pub mod cli;
pub mod commands;
pub mod display;
