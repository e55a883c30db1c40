use iref::{Iri, IriBuf};

/// Context processing stack.
///
/// Contains the list of the remote contexts being processed, to detect
/// loops. A context may be included several times, but never from within
/// itself.
#[derive(Debug, Clone, Default)]
pub struct ProcessingStack {
	urls: Vec<IriBuf>,
}

impl ProcessingStack {
	/// Creates a new empty processing stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Checks if the stack is empty, i.e. no remote context is being
	/// processed.
	pub fn is_empty(&self) -> bool {
		self.urls.is_empty()
	}

	/// Checks if the given URL is already in the stack.
	pub fn cycle(&self, url: &Iri) -> bool {
		self.urls.iter().any(|u| u.as_iri() == url)
	}

	/// Push a new URL to the stack, unless it is already in the stack.
	///
	/// Returns `false` if a loop has been detected.
	pub fn push(&mut self, url: IriBuf) -> bool {
		if self.cycle(&url) {
			false
		} else {
			self.urls.push(url);
			true
		}
	}
}
