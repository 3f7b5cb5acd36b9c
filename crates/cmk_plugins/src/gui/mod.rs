//! Presentation adapters: the link dashlet and the ticket system snapin.
//!
//! Both render self-contained HTML fragments. The monitoring GUI embeds
//! them as-is.

pub mod dashlet;
pub mod html;
pub mod snapin;

pub use dashlet::{DashletConfig, LinkColor, LinkStyle, LinkTarget, LinkType};
pub use snapin::{TicketStats, TICKET_DB_RELATIVE};
