//! Output module for reporting per-URL results
//!
//! The coordinator reports every outcome as an [`OutputMsg`] pushed through a
//! single channel. A consumer drains the channel until it is closed:
//!
//! ```
//! use page_fetch::output::{outbox, OutputMsg};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (outbox, mut messages) = outbox();
//! tokio::spawn(async move {
//!     outbox.send(OutputMsg::info("hello")).await;
//!     outbox.close();
//! });
//!
//! while let Some(msg) = messages.recv().await {
//!     println!("{}", msg);
//! }
//! # }
//! ```

mod channel;
mod message;

pub use channel::{outbox, Outbox, MESSAGE_BUFFER};
pub use message::OutputMsg;
