use std::{
	cell::{Ref, RefCell, RefMut},
	rc::Rc,
};

/// Shared, interior-mutable ownership. Cloning is shallow.
#[derive(Debug, Default)]
pub struct RcCell<T: ?Sized> {
	inner: Rc<RefCell<T>>,
}

impl<T: ?Sized> Clone for RcCell<T> {
	fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<T> RcCell<T> {
	pub fn new(value: T) -> Self { Self { inner: Rc::new(RefCell::new(value)) } }
}

impl<T: ?Sized> RcCell<T> {
	pub fn borrow(&self) -> Ref<'_, T> { self.inner.borrow() }

	pub fn borrow_mut(&self) -> RefMut<'_, T> { self.inner.borrow_mut() }

	/// Whether both handles point at the same value.
	pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }
}
