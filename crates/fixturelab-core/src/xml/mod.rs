pub mod arena;
pub mod builder;
pub mod node;
pub mod parser;

pub use arena::XmlDocument;
pub use node::{Attribute, XmlNodeData};
