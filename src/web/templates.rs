use std::path::PathBuf;

use minijinja::{AutoEscape, Environment, path_loader};
use serde::Serialize;

pub const HOME_PAGE: &str = "pages/home.tmpl";
pub const SEARCH_PAGE: &str = "pages/search.tmpl";

/// HTML templates loaded from disk on first use.
pub struct Templates {
	env: Environment<'static>,
}

impl Templates {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		let mut env = Environment::new();
		env.set_loader(path_loader(dir.into()));
		// Only `.html` files are escaped by default.
		env.set_auto_escape_callback(|_| AutoEscape::Html);
		Self { env }
	}

	pub fn render(&self, name: &str, context: impl Serialize) -> Result<String, minijinja::Error> {
		self.env.get_template(name)?.render(context)
	}
}
