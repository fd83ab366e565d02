use std::{fmt::Debug, rc::Rc};

use crate::{interpreter::builtin::Builtin, parser::Node};

/// Something a word reference resolves to
#[derive(Clone)]
pub enum Word {
	/// A `: name ... ;` definition, or the accessor installed by `var`.
	User(Rc<Vec<Node>>),
	Native(Builtin),
}

impl Debug for Word {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::User(body) => f.debug_tuple("User").field(body).finish(),
			Self::Native(_) => f.debug_tuple("Native").field(&"Function Pointer").finish(),
		}
	}
}
