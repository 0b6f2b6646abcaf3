//! Pagination over NetSuite collection endpoints.
//!
//! NetSuite collection responses wrap records in a [`Page`] envelope whose
//! `links` array carries a `next` link while more results remain. The
//! [`Paginator`] follows those links, calling an injected fetch function
//! with the `offset` and `limit` read from each link.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use netsuite_api::Paginator;
//!
//! let mut paginator = Paginator::new(|offset, limit| {
//!     client.fetch_suiteql::<serde_json::Value>("SELECT id FROM customer", offset, limit)
//! });
//!
//! let stream = paginator.run();
//! futures::pin_mut!(stream);
//! while let Some(page) = stream.try_next().await? {
//!     println!("{} records", page.items.len());
//! }
//! ```

mod page;
mod paginator;

pub use page::{NavigationLink, Page, NEXT_REL};
pub use paginator::{FetchPage, Paginator, DEFAULT_LIMIT};
