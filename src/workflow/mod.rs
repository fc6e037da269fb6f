pub mod document;
pub mod kind;
pub mod node;
pub mod template;

pub use document::*;
pub use kind::*;
pub use node::*;
pub use template::*;
