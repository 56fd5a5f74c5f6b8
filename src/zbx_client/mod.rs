pub(crate) mod client;
pub(crate) mod models;
pub(crate) mod ops;
pub(crate) mod params;
pub(crate) mod rpc;
pub(crate) mod transport;

pub use client::ZbxClient;
pub use models::{Item, RawItem, decode_items};
pub use ops::{ITEM_GET, fetch_items};
pub use params::ItemGetParams;
pub use transport::Transport;
