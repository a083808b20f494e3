/*!
# HTMincer: DOM.
*/

mod builder;
mod node;

pub(crate) use builder::parse;
pub(crate) use node::{
	Attribute,
	ConditionalComment,
	Document,
	Element,
	Node,
};
