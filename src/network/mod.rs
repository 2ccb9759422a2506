pub mod link;
pub mod network;
pub mod node;
pub mod propagation;

pub use link::{Link, LinkId};
pub use network::Network;
pub use node::{Node, NodeId};
